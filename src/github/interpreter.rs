//! GitHub effect interpreter using octocrab.
//!
//! Each effect maps to one REST call, except `CountUnresolvedThreads`, which
//! pages through the pull request's review threads over GraphQL.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::effects::{CommitStatus, GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::{CommentId, PrNumber, PullRequestDescriptor, Sha};

use super::client::OctocrabClient;
use super::error::GitHubApiError;

// ─── GraphQL Types ────────────────────────────────────────────────────────────

/// GraphQL query for one page of a pull request's review threads.
pub const UNRESOLVED_THREADS_QUERY: &str = r#"
query($owner: String!, $repo: String!, $number: Int!, $cursor: String) {
    repository(owner: $owner, name: $repo) {
        pullRequest(number: $number) {
            reviewThreads(first: 100, after: $cursor) {
                nodes {
                    isResolved
                }
                pageInfo {
                    hasNextPage
                    endCursor
                }
            }
        }
    }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<ThreadsQueryData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ThreadsQueryData {
    repository: Option<ThreadsRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadsRepository {
    pull_request: Option<ThreadsPullRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadsPullRequest {
    review_threads: ThreadConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadConnection {
    nodes: Vec<ThreadNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadNode {
    is_resolved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

/// One page of review threads, reduced to what the count needs.
#[derive(Debug, PartialEq, Eq)]
struct ThreadPage {
    unresolved: usize,
    next_cursor: Option<String>,
}

// ─── Interpreter Implementation ───────────────────────────────────────────────

impl GitHubInterpreter for OctocrabClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        debug!(repo = %self.repo(), effect = ?effect, "Executing GitHub effect");
        match effect {
            GitHubEffect::GetPullRequest { pr } => get_pull_request(self, pr).await,
            GitHubEffect::CountUnresolvedThreads { pr } => {
                count_unresolved_threads(self, pr).await
            }
            GitHubEffect::CreateCommitStatus(status) => create_commit_status(self, status).await,
            GitHubEffect::AddLabel { pr, label } => add_label(self, pr, label).await,
            GitHubEffect::RemoveLabel { pr, label } => remove_label(self, pr, label).await,
            GitHubEffect::DeleteComment { comment_id } => delete_comment(self, comment_id).await,
        }
    }
}

// ─── PR Operations ────────────────────────────────────────────────────────────

async fn get_pull_request(
    client: &OctocrabClient,
    pr: PrNumber,
) -> Result<GitHubResponse, GitHubApiError> {
    let pull = client
        .inner()
        .pulls(client.owner(), client.repo_name())
        .get(pr.0)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    let head_ref = Sha::parse(&pull.head.sha).map_err(|e| {
        GitHubApiError::without_source(format!("Invalid head SHA on PR {}: {}", pr, e))
    })?;
    let labels = pull
        .labels
        .unwrap_or_default()
        .into_iter()
        .map(|label| label.name);

    Ok(GitHubResponse::PullRequest(PullRequestDescriptor::new(
        pr, head_ref, labels,
    )))
}

async fn count_unresolved_threads(
    client: &OctocrabClient,
    pr: PrNumber,
) -> Result<GitHubResponse, GitHubApiError> {
    let mut cursor: Option<String> = None;
    let mut unresolved = 0usize;
    let mut pages = 0usize;

    loop {
        let body: serde_json::Value = client
            .inner()
            .graphql(&serde_json::json!({
                "query": UNRESOLVED_THREADS_QUERY,
                "variables": {
                    "owner": client.owner(),
                    "repo": client.repo_name(),
                    "number": pr.0,
                    "cursor": cursor,
                },
            }))
            .await
            .map_err(GitHubApiError::from_octocrab)?;

        let page = parse_thread_page(pr, body)?;
        pages += 1;
        unresolved += page.unresolved;

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(pr = %pr, pages, unresolved, "Counted review threads");
    Ok(GitHubResponse::UnresolvedThreads(unresolved))
}

/// Reads one GraphQL response page.
///
/// A page that claims more results but has no cursor ends the walk rather
/// than looping on the same page.
fn parse_thread_page(pr: PrNumber, body: serde_json::Value) -> Result<ThreadPage, GitHubApiError> {
    let envelope: GraphQlEnvelope = serde_json::from_value(body).map_err(|e| {
        GitHubApiError::without_source(format!("Malformed reviewThreads response: {}", e))
    })?;

    if let Some(first) = envelope.errors.first() {
        return Err(GitHubApiError::without_source(format!(
            "GraphQL error counting threads on PR {}: {}",
            pr, first.message
        )));
    }

    let threads = envelope
        .data
        .and_then(|d| d.repository)
        .and_then(|r| r.pull_request)
        .map(|p| p.review_threads)
        .ok_or_else(|| GitHubApiError::without_source(format!("PR {} not found", pr)))?;

    let unresolved = threads.nodes.iter().filter(|t| !t.is_resolved).count();
    let next_cursor = if threads.page_info.has_next_page {
        threads.page_info.end_cursor
    } else {
        None
    };

    Ok(ThreadPage {
        unresolved,
        next_cursor,
    })
}

// ─── Status Operations ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct StatusRequest<'a> {
    state: &'static str,
    target_url: &'a str,
    description: &'a str,
    context: &'a str,
}

impl<'a> From<&'a CommitStatus> for StatusRequest<'a> {
    fn from(status: &'a CommitStatus) -> Self {
        StatusRequest {
            state: status.state.as_api_str(),
            target_url: &status.target_url,
            description: &status.description,
            context: &status.context,
        }
    }
}

async fn create_commit_status(
    client: &OctocrabClient,
    status: CommitStatus,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = format!(
        "/repos/{}/{}/statuses/{}",
        client.owner(),
        client.repo_name(),
        status.sha
    );

    let _: serde_json::Value = client
        .inner()
        .post(&url, Some(&StatusRequest::from(&status)))
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::StatusCreated)
}

// ─── Label Operations ─────────────────────────────────────────────────────────

async fn add_label(
    client: &OctocrabClient,
    pr: PrNumber,
    label: String,
) -> Result<GitHubResponse, GitHubApiError> {
    client
        .inner()
        .issues(client.owner(), client.repo_name())
        .add_labels(pr.0, &[label])
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::LabelAdded)
}

async fn remove_label(
    client: &OctocrabClient,
    pr: PrNumber,
    label: String,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(client.owner(), client.repo_name())
        .remove_label(pr.0, &label)
        .await
        .map_err(GitHubApiError::from_octocrab);

    label_removal_response(pr, &label, result)
}

/// Maps the label removal result; a 404 means the label was already gone.
fn label_removal_response<T>(
    pr: PrNumber,
    label: &str,
    result: Result<T, GitHubApiError>,
) -> Result<GitHubResponse, GitHubApiError> {
    match result {
        Ok(_) => Ok(GitHubResponse::LabelRemoved),
        Err(e) if e.is_not_found() => {
            warn!(pr = %pr, label, "Label was already absent");
            Ok(GitHubResponse::LabelRemoved)
        }
        Err(e) => Err(e),
    }
}

// ─── Comment Operations ───────────────────────────────────────────────────────

async fn delete_comment(
    client: &OctocrabClient,
    comment_id: CommentId,
) -> Result<GitHubResponse, GitHubApiError> {
    client
        .inner()
        .issues(client.owner(), client.repo_name())
        .delete_comment(comment_id.0.into())
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::CommentDeleted)
}
