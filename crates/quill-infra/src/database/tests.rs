use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus};
use quill_core::error::RepoError;
use quill_core::pagination::PageRequest;
use quill_core::ports::{
    BaseRepository, CommentRepository, PostFilter, PostRepository, UserRepository,
};

use crate::database::entity::post;
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

fn post_model(title: &str, slug: &str, status: post::Status) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        slug: slug.to_owned(),
        author_id: Uuid::new_v4(),
        category_id: None,
        content: "Content".to_owned(),
        excerpt: String::new(),
        featured_image: None,
        status,
        created_at: now.into(),
        updated_at: now.into(),
        published_at: match status {
            post::Status::Published => Some(now.into()),
            post::Status::Draft => None,
        },
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::from(n))])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let model = post_model("Test Post", "test-post", post::Status::Published);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.status, PostStatus::Published);
    assert!(post.published_at.is_some());
}

#[tokio::test]
async fn test_list_posts_counts_then_fetches_page() {
    let rows: Vec<post::Model> = (0..5)
        .map(|i| post_model(&format!("Post {i}"), &format!("post-{i}"), post::Status::Published))
        .collect();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(15)]])
        .append_query_results([rows])
        .into_connection();

    let repo = PostgresPostRepository::new(db.clone());
    let filter = PostFilter {
        search: Some("rust".to_string()),
        ..PostFilter::published()
    };

    let page = repo.list(&filter, PageRequest::new(2)).await.unwrap();
    assert_eq!(page.number, 2);
    assert_eq!(page.total_items, 15);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 5);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("ILIKE"));
    assert!(log.contains("NULLS FIRST"));
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = post_model("Gone", "gone", post::Status::Draft).into();

    let result = repo.update(post).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_set_approved_reports_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let changed = repo
        .set_approved(&[Uuid::new_v4(), Uuid::new_v4()], true)
        .await
        .unwrap();
    assert_eq!(changed, 2);
}

#[tokio::test]
async fn test_find_users_by_no_ids_skips_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresUserRepository::new(db.clone());

    let users = repo.find_by_ids(&[]).await.unwrap();
    assert!(users.is_empty());
    assert!(db.into_transaction_log().is_empty());
}
