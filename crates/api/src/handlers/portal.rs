//! Handlers for the customer portal: training-file listing, detail
//! follow-up, and home counters.
//!
//! The listing endpoint is the query-composition pipeline: untrusted option
//! strings parse through the closed enums in `dossier_core::listing`, the
//! three filter concerns (base scope, filter selection, free-text search)
//! combine by conjunction in the repository, and the fetched page's ids are
//! written back to the user's recent-history list.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use dossier_core::listing::{
    date_range, partition_by_last_author, FilterKey, GroupKey, Pager, SearchBar, SearchScope,
    SortKey, ITEMS_PER_PAGE, RECENT_HISTORY_CAP,
};
use dossier_core::types::DbId;
use dossier_db::models::message::Message;
use dossier_db::models::training_file::{DetailParams, ListParams, TrainingFile};
use dossier_db::repositories::{ListQuery, MessageRepo, RecentFileRepo, TrainingFileRepo};

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Where denied detail requests are redirected instead of erroring.
const MY_ACCOUNT_PATH: &str = "/my";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Payload for the listing endpoint: one page of files plus everything a
/// client needs to re-render the pager and search-bar controls.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub training_files: Vec<TrainingFile>,
    pub pager: Pager,
    pub sortby: &'static str,
    pub filterby: &'static str,
    pub search: Option<String>,
    pub search_in: &'static str,
    pub groupby: &'static str,
    pub searchbar: SearchBar,
}

/// Payload for the detail endpoint: the file and its discussion thread.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub training_file: TrainingFile,
    pub messages: Vec<Message>,
}

/// Payload for the portal home endpoint.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub training_file_count: i64,
}

// ---------------------------------------------------------------------------
// Filter assembly helper
// ---------------------------------------------------------------------------

/// Resolve the raw listing parameters into a repository filter.
///
/// The last-message filters need a cross-record scan: every comment is
/// walked newest-first to find each file's most recent author, and the
/// matching bucket is intersected with the base scope. The scan is global
/// (all files, all comments); intersecting afterwards gives the same result
/// as a scoped scan would.
async fn build_list_query(
    pool: &sqlx::PgPool,
    partner_id: DbId,
    params: &ListParams,
    filter: FilterKey,
    scope: SearchScope,
) -> Result<ListQuery, sqlx::Error> {
    let id_bucket = match filter {
        FilterKey::All => None,
        FilterKey::LastMessageSupport | FilterKey::LastMessageCustomer => {
            let messages = MessageRepo::last_comment_authors(pool).await?;
            let files = TrainingFileRepo::file_partner_pairs(pool).await?;
            let partition = partition_by_last_author(&messages, &files);
            partition.bucket(filter).map(|bucket| bucket.to_vec())
        }
    };

    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| (s.to_string(), scope));

    Ok(ListQuery {
        partner_scope: Some(partner_id),
        id_bucket,
        created_range: date_range(params.date_begin, params.date_end),
        search,
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/my/training-files
///
/// List the authenticated user's training files with filtering, sorting,
/// free-text search, and pagination. Unrecognized option keys fall back to
/// their defaults rather than erroring.
pub async fn list_training_files(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let sort = SortKey::parse(params.sortby.as_deref());
    let filter = FilterKey::parse(params.filterby.as_deref());
    let scope = SearchScope::parse(params.search_in.as_deref());
    let group = GroupKey::parse(params.groupby.as_deref());

    let query = build_list_query(&state.pool, auth.partner_id, &params, filter, scope).await?;

    let total = TrainingFileRepo::count(&state.pool, &query).await?;
    let pager = Pager::build(params.page.unwrap_or(1), total, ITEMS_PER_PAGE);

    let training_files =
        TrainingFileRepo::list(&state.pool, &query, sort, pager.step, pager.offset).await?;

    // Overwrite the recent-history list with this page's ids.
    let recent: Vec<DbId> = training_files
        .iter()
        .take(RECENT_HISTORY_CAP)
        .map(|f| f.id)
        .collect();
    RecentFileRepo::replace(&state.pool, auth.user_id, &recent).await?;

    tracing::debug!(
        user_id = auth.user_id,
        total,
        page = pager.page,
        sortby = sort.key(),
        filterby = filter.key(),
        search = ?params.search,
        "Training-file listing rendered",
    );

    Ok(Json(DataResponse {
        data: ListResponse {
            training_files,
            pager,
            sortby: sort.key(),
            filterby: filter.key(),
            search: params.search,
            search_in: scope.key(),
            groupby: group.key(),
            searchbar: SearchBar::new(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Detail / follow-up
// ---------------------------------------------------------------------------

/// GET /api/v1/training-files/{id}
///
/// Public route: access is granted either by the record's opaque access
/// token (`?access_token=`) or by an authenticated user whose partner owns
/// the record. A missing record and a denied caller get the same answer: a
/// redirect to the portal landing page, never an error body.
pub async fn training_file_detail(
    auth: OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DetailParams>,
) -> AppResult<Response> {
    let Some((file, stored_token)) =
        TrainingFileRepo::find_with_access_token(&state.pool, id).await?
    else {
        return Ok(Redirect::to(MY_ACCOUNT_PATH).into_response());
    };

    let token_grants = matches!(
        (params.access_token.as_deref(), stored_token.as_deref()),
        (Some(presented), Some(stored)) if presented == stored
    );
    let owner_grants = auth
        .0
        .as_ref()
        .is_some_and(|user| file.partner_id == Some(user.partner_id));

    if !token_grants && !owner_grants {
        tracing::debug!(file_id = id, "Training-file access denied, redirecting");
        return Ok(Redirect::to(MY_ACCOUNT_PATH).into_response());
    }

    let messages = MessageRepo::list_comments_for_file(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: DetailResponse {
            training_file: file,
            messages,
        },
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// Home counters
// ---------------------------------------------------------------------------

/// GET /api/v1/my/home
///
/// Counters for the portal home page.
pub async fn portal_home(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let query = ListQuery {
        partner_scope: Some(auth.partner_id),
        ..Default::default()
    };
    let training_file_count = TrainingFileRepo::count(&state.pool, &query).await?;

    Ok(Json(DataResponse {
        data: HomeResponse {
            training_file_count,
        },
    }))
}
