//! PostgreSQL repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, NullOrdering};
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use quill_core::domain::{Category, Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::pagination::{Page, PageRequest};
use quill_core::ports::{
    CategoryRepository, CommentFilter, CommentRepository, PostFilter, PostRepository,
    UserRepository,
};
use quill_core::services::Repositories;

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// All four repositories over one connection pool.
pub fn repositories(db: &DbConn) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
        posts: Arc::new(PostgresPostRepository::new(db.clone())),
        comments: Arc::new(PostgresCommentRepository::new(db.clone())),
    }
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn filtered_posts(filter: &PostFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find();

    if let Some(status) = filter.status {
        query = query.filter(post::Column::Status.eq(post::Status::from(status)));
    }
    if let Some(author_id) = filter.author_id {
        query = query.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(post::Column::CategoryId.eq(category_id));
    }
    if let Some(term) = filter.search.as_deref() {
        let pattern = like_pattern(term);
        query = query.filter(
            Condition::any()
                .add(Expr::col(post::Column::Title).ilike(pattern.as_str()))
                .add(Expr::col(post::Column::Content).ilike(pattern.as_str()))
                .add(Expr::col(post::Column::Excerpt).ilike(pattern.as_str())),
        );
    }

    query
        .order_by_with_nulls(post::Column::PublishedAt, Order::Desc, NullOrdering::First)
        .order_by_desc(post::Column::CreatedAt)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let query = filtered_posts(filter);

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;
        let rows = query
            .offset(page.offset(total))
            .limit(page.per_page())
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(?filter, total, returned = rows.len(), "Listed posts");

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list(&self, filter: &CommentFilter) -> Result<Vec<Comment>, RepoError> {
        let mut query = CommentEntity::find();
        if let Some(post_id) = filter.post_id {
            query = query.filter(comment::Column::PostId.eq(post_id));
        }
        if let Some(approved) = filter.approved {
            query = query.filter(comment::Column::Approved.eq(approved));
        }

        let result = query
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn set_approved(&self, ids: &[Uuid], approved: bool) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = CommentEntity::update_many()
            .col_expr(comment::Column::Approved, Expr::value(approved))
            .col_expr(
                comment::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(comment::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
