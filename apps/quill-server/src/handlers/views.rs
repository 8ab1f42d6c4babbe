//! Conversions from domain results to wire views.

use quill_core::domain::{Category, CommentEntry, PostEntry, PostStatus};
use quill_core::forms::{FormErrors, PostForm};
use quill_core::pagination::Page;
use quill_core::services::{CategoryPage, HomePage, ModerationEntry, PostDetail, PostEditor};
use quill_shared::FieldErrors;
use quill_shared::dto::{
    CategoryPageView, CategoryView, CommentFormValues, CommentView, HomeView,
    ModerationCommentView, PageView, PostDetailView, PostEditorView, PostFormValues, PostView,
};

pub fn category(category: &Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name.clone(),
        slug: category.slug.clone(),
        description: category.description.clone(),
    }
}

pub fn post_entry(entry: PostEntry) -> PostView {
    let category = entry.category.as_ref().map(self::category);
    let post = entry.post;
    PostView {
        id: post.id,
        title: post.title,
        slug: post.slug,
        author: entry.author,
        category,
        content: post.content,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        status: post.status.to_string(),
        created_at: post.created_at,
        updated_at: post.updated_at,
        published_at: post.published_at,
    }
}

pub fn page<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageView<U> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let number = page.number;
    let page = page.map(f);

    PageView {
        items: page.items,
        number,
        num_pages: page.total_pages,
        total_items: page.total_items,
        has_next,
        has_previous,
        next_page_number: has_next.then(|| number + 1),
        previous_page_number: has_previous.then(|| number - 1),
    }
}

fn comment(entry: CommentEntry) -> CommentView {
    CommentView {
        id: entry.comment.id,
        author: entry.author,
        content: entry.comment.content,
        approved: entry.comment.approved,
        created_at: entry.comment.created_at,
    }
}

pub fn home(home: HomePage) -> HomeView {
    HomeView {
        posts: page(home.posts, post_entry),
        categories: home.categories.iter().map(category).collect(),
        search_query: home.search_query,
        category_slug: home.category_slug,
    }
}

pub fn post_detail(detail: PostDetail, comment_text: &str) -> PostDetailView {
    PostDetailView {
        post: post_entry(detail.post),
        comments: detail.comments.into_iter().map(comment).collect(),
        comment_form: CommentFormValues {
            content: comment_text.to_string(),
        },
    }
}

pub fn category_page(page: CategoryPage) -> CategoryPageView {
    CategoryPageView {
        category: category(&page.category),
        posts: self::page(page.posts, post_entry),
    }
}

pub fn post_form(form: &PostForm) -> PostFormValues {
    PostFormValues {
        title: form.title.clone(),
        slug: form.slug.clone(),
        category: form.category.clone(),
        content: form.content.clone(),
        excerpt: form.excerpt.clone(),
        status: form.status.clone(),
    }
}

/// Editor view; `form` overrides the stored values after a failed submission.
pub fn editor(editor: PostEditor, form: Option<&PostForm>) -> PostEditorView {
    PostEditorView {
        form: post_form(form.unwrap_or(&editor.form)),
        post: editor.post.map(post_entry),
        categories: editor.categories.iter().map(category).collect(),
        status_choices: [PostStatus::Draft, PostStatus::Published]
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

pub fn moderation_entry(entry: ModerationEntry) -> ModerationCommentView {
    ModerationCommentView {
        id: entry.comment.id,
        author: entry.author,
        content: entry.comment.content,
        approved: entry.comment.approved,
        created_at: entry.comment.created_at,
        post_title: entry.post_title,
        post_slug: entry.post_slug,
    }
}

pub fn field_errors(errors: FormErrors) -> FieldErrors {
    FieldErrors {
        fields: errors.fields,
        non_field: errors.non_field,
    }
}
