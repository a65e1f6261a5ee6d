use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::LikeState;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn likers_of(
        &self,
        post_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<UserId>>, PostError> {
        let rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT post_id, user_id
            FROM post_likes
            WHERE post_id = ANY($1)
            ORDER BY liked_at, user_id
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let mut likers: HashMap<Uuid, Vec<UserId>> = HashMap::new();
        for (post_id, user_id) in rows {
            likers.entry(post_id).or_default().push(UserId(user_id));
        }
        Ok(likers)
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, likers: Vec<UserId>) -> Post {
        Post {
            id: PostId(self.id),
            author: UserId(self.author_id),
            content: self.content,
            likers,
            created_at: self.created_at,
        }
    }
}

fn map_foreign_key_error(e: sqlx::Error, post_id: &PostId, user_id: &UserId) -> PostError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return match db_err.constraint() {
                Some("post_likes_post_id_fkey") => PostError::NotFound(post_id.to_string()),
                _ => PostError::UnknownUser(user_id.to_string()),
            };
        }
    }
    PostError::DatabaseError(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(post.id.0)
        .bind(post.author.0)
        .bind(&post.content)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_error(e, &post.id, &post.author))?;

        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => {
                let mut likers = self.likers_of(&[r.id]).await?;
                let post_likers = likers.remove(&r.id).unwrap_or_default();
                Ok(Some(r.into_post(post_likers)))
            }
            None => Ok(None),
        }
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(author.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut likers = self.likers_of(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let post_likers = likers.remove(&r.id).unwrap_or_default();
                r.into_post(post_likers)
            })
            .collect())
    }

    async fn update_content(&self, id: &PostId, content: &str) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET content = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<LikeState, PostError> {
        // Single statement: delete the like if present, insert it otherwise.
        // The primary key on (post_id, user_id) keeps the set free of duplicates
        // when two toggles race.
        let liked: bool = sqlx::query_scalar(
            r#"
            WITH removed AS (
                DELETE FROM post_likes
                WHERE post_id = $1 AND user_id = $2
                RETURNING post_id
            ),
            inserted AS (
                INSERT INTO post_likes (post_id, user_id, liked_at)
                SELECT $1, $2, $3
                WHERE NOT EXISTS (SELECT 1 FROM removed)
                ON CONFLICT (post_id, user_id) DO NOTHING
                RETURNING post_id
            )
            SELECT EXISTS (SELECT 1 FROM inserted)
            "#,
        )
        .bind(id.0)
        .bind(user.0)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_error(e, id, user))?;

        Ok(if liked {
            LikeState::Liked
        } else {
            LikeState::Unliked
        })
    }
}
