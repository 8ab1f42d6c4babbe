//! Service-level behaviour of the blog over the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Actor, PostStatus, User};
use quill_core::forms::{
    CategoryForm, CommentForm, ImageUpload, LoginForm, PostForm, RegistrationForm,
};
use quill_core::pagination::PageRequest;
use quill_core::ports::PasswordService;
use quill_core::services::{
    Access, AccountService, BlogService, CommentSubmission, DENIED_DELETE, DENIED_EDIT,
    ListingQuery, ModerationService, Repositories, Submission,
};
use quill_infra::{Argon2PasswordService, InMemoryStore, LocalMediaStorage};

struct Blog {
    repos: Repositories,
    blog: BlogService,
    accounts: AccountService,
    moderation: ModerationService,
    _media: tempfile::TempDir,
}

fn blog() -> Blog {
    let repos = InMemoryStore::new().repositories();
    let media = tempfile::tempdir().unwrap();
    let passwords: Arc<dyn PasswordService> =
        Arc::new(Argon2PasswordService::with_params(1024, 1, 1).unwrap());

    Blog {
        blog: BlogService::new(repos.clone(), Arc::new(LocalMediaStorage::new(media.path()))),
        accounts: AccountService::new(repos.users.clone(), passwords),
        moderation: ModerationService::new(repos.clone()),
        repos,
        _media: media,
    }
}

impl Blog {
    async fn user(&self, name: &str) -> Actor {
        let user = self
            .repos
            .users
            .create(User::new(name.to_string(), "unused".to_string()))
            .await
            .unwrap();
        Actor::from(&user)
    }

    async fn staff(&self, name: &str) -> Actor {
        let user = self
            .repos
            .users
            .create(User::new(name.to_string(), "unused".to_string()).staff())
            .await
            .unwrap();
        Actor::from(&user)
    }

    async fn publish(&self, actor: &Actor, title: &str) -> quill_core::domain::Post {
        self.post(actor, title, "published").await
    }

    async fn post(&self, actor: &Actor, title: &str, status: &str) -> quill_core::domain::Post {
        match self
            .blog
            .create_post(actor, &post_form(title, status))
            .await
            .unwrap()
        {
            Submission::Accepted(post) => post,
            Submission::Rejected(errors) => panic!("post rejected: {errors}"),
        }
    }
}

fn post_form(title: &str, status: &str) -> PostForm {
    PostForm {
        title: title.to_string(),
        content: format!("Content of {title}"),
        status: status.to_string(),
        ..PostForm::default()
    }
}

fn comment(content: &str) -> CommentForm {
    CommentForm {
        content: content.to_string(),
    }
}

#[tokio::test]
async fn test_drafts_are_never_public() {
    let app = blog();
    let alice = app.user("alice").await;
    app.post(&alice, "Hidden Thoughts", "draft").await;
    app.publish(&alice, "Public Thoughts").await;

    let home = app.blog.home(ListingQuery::default()).await.unwrap();
    let titles: Vec<&str> = home.posts.items.iter().map(|e| e.post.title.as_str()).collect();
    assert_eq!(titles, ["Public Thoughts"]);

    let detail = app.blog.post_detail("hidden-thoughts").await;
    assert!(matches!(detail, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_slug_derived_and_collision_surfaces_as_store_error() {
    let app = blog();
    let alice = app.user("alice").await;

    let post = app.publish(&alice, "Test Post").await;
    assert_eq!(post.slug, "test-post");

    let again = app.blog.create_post(&alice, &post_form("Test Post", "published")).await;
    assert!(matches!(again, Err(DomainError::Repository(_))));
}

#[tokio::test]
async fn test_derived_slugs_respect_column_bounds() {
    let app = blog();
    let alice = app.user("alice").await;
    let admin = app.staff("admin").await;

    let long_post = app
        .blog
        .create_post(&alice, &post_form(&"日".repeat(200), "published"))
        .await
        .unwrap();
    match long_post {
        Submission::Rejected(errors) => assert!(errors.has("title")),
        Submission::Accepted(post) => panic!("accepted slug of {} chars", post.slug.len()),
    }

    let post = app.publish(&alice, &"日".repeat(60)).await;
    assert!(post.slug.chars().count() <= 200);

    let long_category = CategoryForm {
        name: "日".repeat(100),
        ..CategoryForm::default()
    };
    match app.moderation.create_category(&admin, &long_category).await.unwrap() {
        Submission::Rejected(errors) => assert!(errors.has("name")),
        Submission::Accepted(category) => {
            panic!("accepted slug of {} chars", category.slug.len())
        }
    }

    let home = app.blog.home(ListingQuery::default()).await.unwrap();
    assert_eq!(home.posts.items.len(), 1);
    assert!(home.categories.is_empty());
}

#[tokio::test]
async fn test_publication_stamp_survives_edits() {
    let app = blog();
    let alice = app.user("alice").await;

    let draft = app.post(&alice, "Slow Burn", "draft").await;
    assert!(draft.published_at.is_none());

    let published = match app
        .blog
        .edit_post(&alice, "slow-burn", &post_form("Slow Burn", "published"))
        .await
        .unwrap()
    {
        Access::Granted(Submission::Accepted(post)) => post,
        other => panic!("unexpected outcome: {other:?}"),
    };
    let stamped = published.published_at.expect("stamped on publish");

    let edited = match app
        .blog
        .edit_post(&alice, "slow-burn", &post_form("Slow Burn, revised", "published"))
        .await
        .unwrap()
    {
        Access::Granted(Submission::Accepted(post)) => post,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(edited.published_at, Some(stamped));
    assert_eq!(edited.slug, "slow-burn");
}

#[tokio::test]
async fn test_fifteen_posts_paginate_ten_and_five() {
    let app = blog();
    let alice = app.user("alice").await;
    for i in 0..15 {
        app.publish(&alice, &format!("Post number {i}")).await;
    }

    let first = app.blog.home(ListingQuery::default()).await.unwrap();
    assert_eq!(first.posts.items.len(), 10);
    assert!(first.posts.has_next());

    let second = app
        .blog
        .home(ListingQuery {
            page: PageRequest::new(2),
            ..ListingQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(second.posts.items.len(), 5);
    assert!(!second.posts.has_next());

    let beyond = app
        .blog
        .home(ListingQuery {
            page: PageRequest::parse(Some("99")),
            ..ListingQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(beyond.posts.number, 2);
}

#[tokio::test]
async fn test_search_is_case_insensitive_over_published_posts() {
    let app = blog();
    let alice = app.user("alice").await;
    app.publish(&alice, "Learning Rust").await;
    app.publish(&alice, "Gardening Notes").await;
    app.post(&alice, "Rust Draft", "draft").await;

    let home = app
        .blog
        .home(ListingQuery {
            search: Some("rUsT".to_string()),
            ..ListingQuery::default()
        })
        .await
        .unwrap();
    let titles: Vec<&str> = home.posts.items.iter().map(|e| e.post.title.as_str()).collect();
    assert_eq!(titles, ["Learning Rust"]);
    assert_eq!(home.search_query, "rUsT");
}

#[tokio::test]
async fn test_category_filter_and_unknown_category() {
    let app = blog();
    let alice = app.user("alice").await;
    let admin = app.staff("admin").await;

    let tech = match app
        .moderation
        .create_category(
            &admin,
            &CategoryForm {
                name: "Tech".to_string(),
                ..CategoryForm::default()
            },
        )
        .await
        .unwrap()
    {
        Submission::Accepted(category) => category,
        Submission::Rejected(errors) => panic!("category rejected: {errors}"),
    };

    let mut form = post_form("Filed Under Tech", "published");
    form.category = tech.id.to_string();
    app.blog.create_post(&alice, &form).await.unwrap();
    app.publish(&alice, "Uncategorized").await;

    let page = app.blog.category_posts("tech", PageRequest::first()).await.unwrap();
    assert_eq!(page.posts.items.len(), 1);
    assert_eq!(page.posts.items[0].category.as_ref().map(|c| c.slug.as_str()), Some("tech"));

    let home = app
        .blog
        .home(ListingQuery {
            category: Some("nope".to_string()),
            ..ListingQuery::default()
        })
        .await
        .unwrap();
    assert!(home.posts.items.is_empty());

    let missing = app.blog.category_posts("nope", PageRequest::first()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_unknown_category_choice_is_a_field_error() {
    let app = blog();
    let alice = app.user("alice").await;

    let mut form = post_form("Misfiled", "published");
    form.category = Uuid::new_v4().to_string();

    match app.blog.create_post(&alice, &form).await.unwrap() {
        Submission::Rejected(errors) => assert!(errors.has("category")),
        Submission::Accepted(_) => panic!("unknown category accepted"),
    }
}

#[tokio::test]
async fn test_only_author_or_staff_may_edit_and_delete() {
    let app = blog();
    let alice = app.user("alice").await;
    let mallory = app.user("mallory").await;
    let admin = app.staff("admin").await;
    app.publish(&alice, "Mine").await;

    match app.blog.edit_form(&mallory, "mine").await.unwrap() {
        Access::Denied { post_slug, reason } => {
            assert_eq!(post_slug, "mine");
            assert_eq!(reason, DENIED_EDIT);
        }
        Access::Granted(_) => panic!("stranger granted edit"),
    }

    let denied = app.blog.delete_post(&mallory, "mine").await.unwrap();
    assert!(matches!(denied, Access::Denied { reason, .. } if reason == DENIED_DELETE));
    assert!(app.blog.post_detail("mine").await.is_ok());

    assert!(app.blog.edit_form(&alice, "mine").await.unwrap().is_granted());
    assert!(app.blog.delete_confirmation(&admin, "mine").await.unwrap().is_granted());
    assert!(app.blog.delete_post(&admin, "mine").await.unwrap().is_granted());
    assert!(app.blog.post_detail("mine").await.is_err());
}

#[tokio::test]
async fn test_comments_wait_for_approval() {
    let app = blog();
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let admin = app.staff("admin").await;
    app.publish(&alice, "Discuss").await;

    let created = match app
        .blog
        .submit_comment(Some(&bob), "discuss", &comment("Nice post"))
        .await
        .unwrap()
    {
        CommentSubmission::Created(comment) => comment,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert!(!created.approved);
    assert!(app.blog.post_detail("discuss").await.unwrap().comments.is_empty());

    let pending = app.moderation.list_comments(&admin, Some(false)).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].author, "bob");
    assert_eq!(pending[0].post_slug, "discuss");

    let changed = app
        .moderation
        .set_comments_approved(&admin, &[created.id], true)
        .await
        .unwrap();
    assert_eq!(changed, 1);

    let detail = app.blog.post_detail("discuss").await.unwrap();
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].author, "bob");
    assert_eq!(detail.comments[0].comment.content, "Nice post");
}

#[tokio::test]
async fn test_anonymous_and_invalid_comments_store_nothing() {
    let app = blog();
    let alice = app.user("alice").await;
    let admin = app.staff("admin").await;
    app.publish(&alice, "Quiet").await;

    let anonymous = app
        .blog
        .submit_comment(None, "quiet", &comment("Drive-by"))
        .await
        .unwrap();
    assert!(matches!(anonymous, CommentSubmission::Ignored(_)));

    let blank = app
        .blog
        .submit_comment(Some(&alice), "quiet", &comment("   "))
        .await
        .unwrap();
    assert!(matches!(blank, CommentSubmission::Rejected { ref errors, .. } if errors.has("content")));

    assert!(app.moderation.list_comments(&admin, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_moderation_requires_staff() {
    let app = blog();
    let alice = app.user("alice").await;

    let result = app.moderation.list_comments(&alice, None).await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn test_deleting_post_removes_its_comments() {
    let app = blog();
    let alice = app.user("alice").await;
    let admin = app.staff("admin").await;
    app.publish(&alice, "Short Lived").await;
    app.blog
        .submit_comment(Some(&alice), "short-lived", &comment("First"))
        .await
        .unwrap();

    app.blog.delete_post(&alice, "short-lived").await.unwrap();
    assert!(app.moderation.list_comments(&admin, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_category_keeps_posts() {
    let app = blog();
    let alice = app.user("alice").await;
    let admin = app.staff("admin").await;
    let category = match app
        .moderation
        .create_category(
            &admin,
            &CategoryForm {
                name: "Travel".to_string(),
                ..CategoryForm::default()
            },
        )
        .await
        .unwrap()
    {
        Submission::Accepted(category) => category,
        Submission::Rejected(errors) => panic!("category rejected: {errors}"),
    };

    let mut form = post_form("Road Trip", "published");
    form.category = category.id.to_string();
    app.blog.create_post(&alice, &form).await.unwrap();

    app.moderation.delete_category(&admin, "travel").await.unwrap();

    let detail = app.blog.post_detail("road-trip").await.unwrap();
    assert!(detail.post.category.is_none());
    assert!(detail.post.post.category_id.is_none());
}

#[tokio::test]
async fn test_duplicate_category_name_is_a_field_error() {
    let app = blog();
    let admin = app.staff("admin").await;
    let form = CategoryForm {
        name: "News".to_string(),
        ..CategoryForm::default()
    };

    assert!(app.moderation.create_category(&admin, &form).await.unwrap().is_accepted());
    match app.moderation.create_category(&admin, &form).await.unwrap() {
        Submission::Rejected(errors) => assert!(errors.has("name")),
        Submission::Accepted(_) => panic!("duplicate category accepted"),
    }
}

#[tokio::test]
async fn test_user_posts_include_drafts_first() {
    let app = blog();
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    app.publish(&alice, "Alice Live").await;
    app.post(&alice, "Alice Draft", "draft").await;
    app.publish(&bob, "Bob Live").await;

    let mine = app.blog.user_posts(&alice, PageRequest::first()).await.unwrap();
    let titles: Vec<&str> = mine.items.iter().map(|e| e.post.title.as_str()).collect();
    assert_eq!(titles, ["Alice Draft", "Alice Live"]);
    assert_eq!(mine.items[0].post.status, PostStatus::Draft);
}

#[tokio::test]
async fn test_attach_image_stores_and_links_file() {
    let app = blog();
    let alice = app.user("alice").await;
    let mallory = app.user("mallory").await;
    app.publish(&alice, "Pictured").await;

    let png = b"\x89PNG\r\n\x1a\nrest-of-file";
    let upload = ImageUpload {
        filename: "Cover Shot.png",
        bytes: png,
    };

    let denied = app.blog.attach_image(&mallory, "pictured", upload).await.unwrap();
    assert!(!denied.is_granted());

    let post = match app.blog.attach_image(&alice, "pictured", upload).await.unwrap() {
        Access::Granted(Submission::Accepted(post)) => post,
        other => panic!("unexpected outcome: {other:?}"),
    };
    let path = post.featured_image.expect("image attached");
    assert!(path.starts_with("posts/"));
    assert!(path.ends_with("/cover-shot.png"));

    let bogus = ImageUpload {
        filename: "cover.png",
        bytes: b"not an image",
    };
    let rejected = app.blog.attach_image(&alice, "pictured", bogus).await.unwrap();
    assert!(matches!(
        rejected,
        Access::Granted(Submission::Rejected(ref errors)) if errors.has("featured_image")
    ));
}

#[tokio::test]
async fn test_register_then_login() {
    let app = blog();
    let form = RegistrationForm {
        username: "newcomer".to_string(),
        password1: "correct horse".to_string(),
        password2: "correct horse".to_string(),
    };

    let user = match app.accounts.register(&form).await.unwrap() {
        Submission::Accepted(user) => user,
        Submission::Rejected(errors) => panic!("registration rejected: {errors}"),
    };
    assert!(!user.is_staff);
    assert_ne!(user.password_hash, "correct horse");

    match app.accounts.register(&form).await.unwrap() {
        Submission::Rejected(errors) => assert!(errors.has("username")),
        Submission::Accepted(_) => panic!("duplicate username accepted"),
    }

    let login = app
        .accounts
        .authenticate(&LoginForm {
            username: "newcomer".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    assert!(login.is_accepted());

    let wrong = app
        .accounts
        .authenticate(&LoginForm {
            username: "newcomer".to_string(),
            password: "wrong password".to_string(),
        })
        .await
        .unwrap();
    assert!(matches!(wrong, Submission::Rejected(ref errors) if !errors.non_field.is_empty()));
}

#[tokio::test]
async fn test_ensure_staff_promotes_existing_user() {
    let app = blog();
    app.user("admin").await;

    let user = app.accounts.ensure_staff("admin", "s3cret-pass").await.unwrap();
    assert!(user.is_staff);

    let login = app
        .accounts
        .authenticate(&LoginForm {
            username: "admin".to_string(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .unwrap();
    assert!(login.is_accepted());
}
