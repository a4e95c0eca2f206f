//! Post views: index, detail, create, edit, delete.
//!
//! Each action composes the checks it needs explicitly: `require_login`
//! for authoring, `owner_guard` before touching an existing post.

use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use validator::ValidationErrors;

use super::forms::{invalid_choice, PostForm};
use super::models::{Post, PostFields, PostListing, PostQuery};
use crate::common::forms::field_errors;
use crate::common::{
    owner_guard, urls, Access, AppError, AppResult, Outcome, Paginator, PostId, RequestContext,
};
use crate::domains::auth::actions::current_user;
use crate::domains::categories::Category;
use crate::domains::comments::forms::CommentForm;
use crate::domains::comments::Comment;
use crate::domains::locations::Location;

const INDEX_TEMPLATE: &str = "blog/index.html";
const DETAIL_TEMPLATE: &str = "blog/detail.html";
const FORM_TEMPLATE: &str = "blog/create.html";

/// Home page: every publicly visible post, newest first.
pub async fn index(page: Option<&str>, pool: &PgPool) -> AppResult<Outcome> {
    let query = PostQuery::visible(Utc::now());
    let paginator = Paginator::new(query.count(pool).await?);
    let number = paginator.resolve(page)?;
    let posts = query.fetch(paginator.window(number), pool).await?;

    Ok(Outcome::render(
        INDEX_TEMPLATE,
        json!({ "page_obj": paginator.page(number, posts) }),
    ))
}

/// Post page with its comments. Authors see their own post in any state.
pub async fn detail(
    ctx: &RequestContext,
    post_id: PostId,
    page: Option<&str>,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let post = find_listing_for(ctx, post_id, pool).await?;

    let paginator = Paginator::new(Comment::count_for_post(post_id, pool).await?);
    let number = paginator.resolve(page)?;
    let comments = Comment::list_for_post(post_id, paginator.window(number), pool).await?;

    Ok(Outcome::render(
        DETAIL_TEMPLATE,
        json!({
            "post": post,
            "form": CommentForm::default(),
            "page_obj": paginator.page(number, comments),
        }),
    ))
}

pub async fn create_form(ctx: &RequestContext, pool: &PgPool) -> AppResult<Outcome> {
    ctx.require_login()?;
    render_form(&PostForm::initial(Utc::now()), None, None, pool).await
}

pub async fn create(ctx: &RequestContext, form: PostForm, pool: &PgPool) -> AppResult<Outcome> {
    let author = current_user(ctx, pool).await?;

    let fields = match clean(&form, pool).await? {
        Ok(fields) => fields,
        Err(errors) => return render_form(&form, None, Some(&errors), pool).await,
    };

    let post = Post::create(author.id, &fields, pool).await?;
    info!(post_id = %post.id, author = %author.username, "Post created");

    Ok(Outcome::redirect(urls::profile(&author.username)))
}

pub async fn edit_form(ctx: &RequestContext, post_id: PostId, pool: &PgPool) -> AppResult<Outcome> {
    let post = find_post(post_id, pool).await?;
    if let Access::RedirectTo(location) =
        owner_guard(ctx.actor.as_ref(), post.author_id, urls::post_detail(post.id))
    {
        return Ok(Outcome::Redirect(location));
    }

    render_form(&PostForm::from_post(&post), Some(&post), None, pool).await
}

pub async fn update(
    ctx: &RequestContext,
    post_id: PostId,
    form: PostForm,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let post = find_post(post_id, pool).await?;
    if let Access::RedirectTo(location) =
        owner_guard(ctx.actor.as_ref(), post.author_id, urls::post_detail(post.id))
    {
        return Ok(Outcome::Redirect(location));
    }
    let actor = ctx.require_login()?;

    let fields = match clean(&form, pool).await? {
        Ok(fields) => fields,
        Err(errors) => return render_form(&form, Some(&post), Some(&errors), pool).await,
    };

    Post::update(post.id, &fields, pool).await?;
    info!(post_id = %post.id, author = %actor.username, "Post updated");

    Ok(Outcome::redirect(urls::profile(&actor.username)))
}

/// Confirmation page for deleting a post.
pub async fn delete_confirm(
    ctx: &RequestContext,
    post_id: PostId,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let post = find_post(post_id, pool).await?;
    if let Access::RedirectTo(location) =
        owner_guard(ctx.actor.as_ref(), post.author_id, urls::post_detail(post.id))
    {
        return Ok(Outcome::Redirect(location));
    }

    Ok(Outcome::render(
        FORM_TEMPLATE,
        json!({
            "post": post,
            "form": PostForm::from_post(&post),
        }),
    ))
}

pub async fn delete(ctx: &RequestContext, post_id: PostId, pool: &PgPool) -> AppResult<Outcome> {
    let post = find_post(post_id, pool).await?;
    if let Access::RedirectTo(location) =
        owner_guard(ctx.actor.as_ref(), post.author_id, urls::post_detail(post.id))
    {
        return Ok(Outcome::Redirect(location));
    }
    let actor = ctx.require_login()?;

    Post::delete(post.id, pool).await?;
    info!(post_id = %post.id, author = %actor.username, "Post deleted");

    Ok(Outcome::redirect(urls::profile(&actor.username)))
}

/// Load a post as `ctx` may see it: in any state for its author,
/// otherwise only when publicly visible.
pub async fn find_listing_for(
    ctx: &RequestContext,
    post_id: PostId,
    pool: &PgPool,
) -> AppResult<PostListing> {
    let listing = PostQuery::all()
        .with_id(post_id)
        .fetch_one(pool)
        .await?
        .ok_or(AppError::NotFound)?;

    if ctx.actor_id() == Some(listing.post.author_id) || listing.is_visible_at(Utc::now()) {
        Ok(listing)
    } else {
        Err(AppError::NotFound)
    }
}

async fn find_post(post_id: PostId, pool: &PgPool) -> AppResult<Post> {
    Post::find_by_id(post_id, pool).await?.ok_or(AppError::NotFound)
}

/// Validate the form, then check the chosen category and location exist.
async fn clean(form: &PostForm, pool: &PgPool) -> AppResult<Result<PostFields, ValidationErrors>> {
    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => return Ok(Err(errors)),
    };

    let mut errors = ValidationErrors::new();
    if let Some(category_id) = fields.category_id {
        if Category::find_by_id(category_id, pool).await?.is_none() {
            errors.add("category", invalid_choice());
        }
    }
    if let Some(location_id) = fields.location_id {
        if Location::find_by_id(location_id, pool).await?.is_none() {
            errors.add("location", invalid_choice());
        }
    }

    if errors.is_empty() {
        Ok(Ok(fields))
    } else {
        Ok(Err(errors))
    }
}

async fn render_form(
    form: &PostForm,
    post: Option<&Post>,
    errors: Option<&ValidationErrors>,
    pool: &PgPool,
) -> AppResult<Outcome> {
    let categories = Category::find_all(pool).await?;
    let locations = Location::find_all(pool).await?;

    Ok(Outcome::render(
        FORM_TEMPLATE,
        json!({
            "form": form,
            "post": post,
            "errors": errors.map(field_errors).unwrap_or_default(),
            "categories": categories,
            "locations": locations,
        }),
    ))
}
