//! Minimal server-rendered pages.
//!
//! Every piece of user-supplied text goes through `html_escape` before it is
//! interpolated.

use html_escape::encode_double_quoted_attribute;
use html_escape::encode_text;

use crate::domain::post::models::Post;
use crate::domain::user::models::User;

/// URL prefix under which uploaded pictures are served.
pub const UPLOADS_URL_PREFIX: &str = "/images/uploads";

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{}</title>
</head>
<body>
{}
</body>
</html>"#,
        encode_text(title),
        body
    )
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", encode_text(e)))
        .collect();
    format!(r#"<ul class="errors">{}</ul>"#, items)
}

pub fn signup_page(errors: &[String]) -> String {
    let body = format!(
        r#"<h1>Create account</h1>
{}
<form method="post" action="/signup">
<input name="username" placeholder="Username">
<input name="email" type="email" placeholder="Email">
<input name="password" type="password" placeholder="Password">
<input name="city" placeholder="City">
<input name="age" type="number" placeholder="Age">
<button type="submit">Sign up</button>
</form>
<p><a href="/login">Already have an account?</a></p>"#,
        error_list(errors)
    );
    layout("Sign up", &body)
}

pub fn login_page(error: Option<&str>) -> String {
    let errors: Vec<String> = error.map(str::to_string).into_iter().collect();
    let body = format!(
        r#"<h1>Log in</h1>
{}
<form method="post" action="/login">
<input name="username" placeholder="Username">
<input name="password" type="password" placeholder="Password">
<button type="submit">Log in</button>
</form>
<p><a href="/">Create an account</a></p>"#,
        error_list(&errors)
    );
    layout("Log in", &body)
}

fn picture_src(user: &User) -> String {
    format!(
        "{}/{}",
        UPLOADS_URL_PREFIX,
        encode_double_quoted_attribute(&user.profile_picture)
    )
}

pub fn profile_page(user: &User) -> String {
    let body = format!(
        r#"<h1>{username}</h1>
<img class="profile-picture" src="{picture}" alt="Profile picture">
<p><a href="/profile/upload">Change picture</a></p>
<dl>
<dt>Email</dt><dd>{email}</dd>
<dt>Age</dt><dd>{age}</dd>
<dt>City</dt><dd>{city}</dd>
<dt>Posts</dt><dd>{posts}</dd>
</dl>
<p><a href="/post">Posts</a> | <a href="/logout">Log out</a></p>"#,
        username = encode_text(user.username.as_str()),
        picture = picture_src(user),
        email = encode_text(user.email.as_str()),
        age = user.age,
        city = encode_text(user.city.as_str()),
        posts = user.posts.len(),
    );
    layout("Profile", &body)
}

fn post_item(post: &Post, viewer: &User) -> String {
    let like_label = if post.is_liked_by(&viewer.id) {
        "Unlike"
    } else {
        "Like"
    };
    let edit_link = if post.is_authored_by(&viewer.id) {
        format!(r#" <a href="/edit/{}">Edit</a>"#, post.id)
    } else {
        String::new()
    };

    format!(
        r#"<li class="post">
<p>{content}</p>
<small>{created_at}</small>
<span class="likes">{likes} like(s)</span>
<a href="/like/{id}">{like_label}</a>{edit_link}
</li>"#,
        content = encode_text(&post.content),
        created_at = post.created_at.format("%Y-%m-%d %H:%M"),
        likes = post.like_count(),
        id = post.id,
        like_label = like_label,
        edit_link = edit_link,
    )
}

pub fn posts_page(user: &User, posts: &[Post]) -> String {
    let items: String = posts.iter().map(|p| post_item(p, user)).collect();
    let body = format!(
        r#"<h1>Hello, {username}</h1>
<img class="profile-picture" src="{picture}" alt="Profile picture">
<form method="post" action="/post">
<textarea name="content" placeholder="What's on your mind?"></textarea>
<button type="submit">Post</button>
</form>
<ul class="posts">{items}</ul>
<p><a href="/profile">Profile</a> | <a href="/logout">Log out</a></p>"#,
        username = encode_text(user.username.as_str()),
        picture = picture_src(user),
        items = items,
    );
    layout("Posts", &body)
}

pub fn edit_page(post: &Post) -> String {
    let body = format!(
        r#"<h1>Edit post</h1>
<form method="post" action="/edit/{id}">
<textarea name="content">{content}</textarea>
<button type="submit">Save</button>
</form>
<p><a href="/post">Back</a></p>"#,
        id = post.id,
        content = encode_text(&post.content),
    );
    layout("Edit post", &body)
}

pub fn upload_page() -> String {
    let body = r#"<h1>Upload profile picture</h1>
<form method="post" action="/upload" enctype="multipart/form-data">
<input type="file" name="profilePic" accept="image/*">
<button type="submit">Upload</button>
</form>
<p><a href="/profile">Back</a></p>"#;
    layout("Upload", body)
}

pub fn message_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/post\">Back</a></p>",
        encode_text(title),
        encode_text(message)
    );
    layout(title, &body)
}
