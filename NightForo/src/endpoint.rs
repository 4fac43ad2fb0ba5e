//! Endpoint registry.
//!
//! Every remote resource is described by a relative path and the set of HTTP
//! methods the forum accepts on it. Building an [`Endpoint`] never touches the
//! network; it is resolved against the configured base URL at dispatch time.

use std::fmt;

use crate::models::{
    AlertId, AttachmentId, ConversationId, ConversationMessageId, NodeId, PostId,
    ProfilePostCommentId, ProfilePostId, ThreadId, UserId,
};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// All methods, in declaration order.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Head,
        Method::Options,
    ];

    /// Upper-case method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    /// Whether parameters for this method travel in the query string.
    pub fn uses_query(&self) -> bool {
        matches!(self, Method::Get | Method::Head | Method::Delete | Method::Options)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// A remote resource path and the methods it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    methods: &'static [Method],
}

impl Endpoint {
    /// Create an endpoint from a relative path.
    pub fn new(path: impl Into<String>, methods: &'static [Method]) -> Self {
        Self {
            path: path.into(),
            methods,
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Methods accepted by this endpoint.
    pub fn methods(&self) -> &'static [Method] {
        self.methods
    }

    /// Check whether the endpoint accepts `method`.
    pub fn allows(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

use Method::{Delete, Get, Post};

const GET: &[Method] = &[Get];
const POST: &[Method] = &[Post];
const GET_POST: &[Method] = &[Get, Post];
const GET_DELETE: &[Method] = &[Get, Delete];
const POST_DELETE: &[Method] = &[Post, Delete];
const GET_POST_DELETE: &[Method] = &[Get, Post, Delete];

// Alerts

pub fn alerts() -> Endpoint {
    Endpoint::new("alerts", GET_POST)
}

pub fn alerts_mark_all() -> Endpoint {
    Endpoint::new("alerts/mark-all", POST)
}

pub fn alert(id: AlertId) -> Endpoint {
    Endpoint::new(format!("alerts/{id}"), GET)
}

pub fn alert_mark(id: AlertId) -> Endpoint {
    Endpoint::new(format!("alerts/{id}/mark"), POST)
}

// Attachments

pub fn attachments() -> Endpoint {
    Endpoint::new("attachments", GET_POST)
}

pub fn attachments_new_key() -> Endpoint {
    Endpoint::new("attachments/new-key", POST)
}

pub fn attachment(id: AttachmentId) -> Endpoint {
    Endpoint::new(format!("attachments/{id}"), GET_DELETE)
}

pub fn attachment_data(id: AttachmentId) -> Endpoint {
    Endpoint::new(format!("attachments/{id}/data"), GET)
}

pub fn attachment_thumbnail(id: AttachmentId) -> Endpoint {
    Endpoint::new(format!("attachments/{id}/thumbnail"), GET)
}

// Auth

pub fn auth() -> Endpoint {
    Endpoint::new("auth", POST)
}

pub fn auth_from_session() -> Endpoint {
    Endpoint::new("auth/from-session", POST)
}

pub fn auth_login_token() -> Endpoint {
    Endpoint::new("auth/login-token", POST)
}

// Conversation messages

pub fn conversation_messages() -> Endpoint {
    Endpoint::new("conversation-messages", POST)
}

pub fn conversation_message(id: ConversationMessageId) -> Endpoint {
    Endpoint::new(format!("conversation-messages/{id}"), GET_POST)
}

pub fn conversation_message_react(id: ConversationMessageId) -> Endpoint {
    Endpoint::new(format!("conversation-messages/{id}/react"), POST)
}

// Conversations

pub fn conversations() -> Endpoint {
    Endpoint::new("conversations", GET_POST)
}

pub fn conversation(id: ConversationId) -> Endpoint {
    Endpoint::new(format!("conversations/{id}"), GET_POST_DELETE)
}

pub fn conversation_invite(id: ConversationId) -> Endpoint {
    Endpoint::new(format!("conversations/{id}/invite"), POST)
}

pub fn conversation_mark_read(id: ConversationId) -> Endpoint {
    Endpoint::new(format!("conversations/{id}/mark-read"), POST)
}

pub fn conversation_mark_unread(id: ConversationId) -> Endpoint {
    Endpoint::new(format!("conversations/{id}/mark-unread"), POST)
}

pub fn conversation_messages_list(id: ConversationId) -> Endpoint {
    Endpoint::new(format!("conversations/{id}/messages"), GET)
}

pub fn conversation_star(id: ConversationId) -> Endpoint {
    Endpoint::new(format!("conversations/{id}/star"), POST)
}

// Forums

pub fn forum(id: NodeId) -> Endpoint {
    Endpoint::new(format!("forums/{id}"), GET)
}

pub fn forum_mark_read(id: NodeId) -> Endpoint {
    Endpoint::new(format!("forums/{id}/mark-read"), POST)
}

pub fn forum_threads(id: NodeId) -> Endpoint {
    Endpoint::new(format!("forums/{id}/threads"), GET)
}

// Site

pub fn index() -> Endpoint {
    Endpoint::new("index", GET)
}

pub fn stats() -> Endpoint {
    Endpoint::new("stats", GET)
}

// Me

pub fn me() -> Endpoint {
    Endpoint::new("me", GET_POST)
}

pub fn me_avatar() -> Endpoint {
    Endpoint::new("me/avatar", POST_DELETE)
}

pub fn me_email() -> Endpoint {
    Endpoint::new("me/email", POST)
}

pub fn me_password() -> Endpoint {
    Endpoint::new("me/password", POST)
}

// Nodes

pub fn nodes() -> Endpoint {
    Endpoint::new("nodes", GET_POST)
}

pub fn nodes_flattened() -> Endpoint {
    Endpoint::new("nodes/flattened", GET)
}

pub fn node(id: NodeId) -> Endpoint {
    Endpoint::new(format!("nodes/{id}"), GET_POST_DELETE)
}

// Posts

pub fn posts() -> Endpoint {
    Endpoint::new("posts", POST)
}

pub fn post(id: PostId) -> Endpoint {
    Endpoint::new(format!("posts/{id}"), GET_POST_DELETE)
}

pub fn post_mark_solution(id: PostId) -> Endpoint {
    Endpoint::new(format!("posts/{id}/mark-solution"), POST)
}

pub fn post_react(id: PostId) -> Endpoint {
    Endpoint::new(format!("posts/{id}/react"), POST)
}

pub fn post_vote(id: PostId) -> Endpoint {
    Endpoint::new(format!("posts/{id}/vote"), POST)
}

// Profile post comments

pub fn profile_post_comments() -> Endpoint {
    Endpoint::new("profile-post-comments", POST)
}

pub fn profile_post_comment(id: ProfilePostCommentId) -> Endpoint {
    Endpoint::new(format!("profile-post-comments/{id}"), GET_POST_DELETE)
}

pub fn profile_post_comment_react(id: ProfilePostCommentId) -> Endpoint {
    Endpoint::new(format!("profile-post-comments/{id}/react"), POST)
}

// Profile posts

pub fn profile_posts() -> Endpoint {
    Endpoint::new("profile-posts", POST)
}

pub fn profile_post(id: ProfilePostId) -> Endpoint {
    Endpoint::new(format!("profile-posts/{id}"), GET_POST_DELETE)
}

pub fn profile_post_comments_list(id: ProfilePostId) -> Endpoint {
    Endpoint::new(format!("profile-posts/{id}/comments"), GET)
}

pub fn profile_post_react(id: ProfilePostId) -> Endpoint {
    Endpoint::new(format!("profile-posts/{id}/react"), POST)
}

// Threads

pub fn threads() -> Endpoint {
    Endpoint::new("threads", GET_POST)
}

pub fn thread(id: ThreadId) -> Endpoint {
    Endpoint::new(format!("threads/{id}"), GET_POST_DELETE)
}

pub fn thread_change_type(id: ThreadId) -> Endpoint {
    Endpoint::new(format!("threads/{id}/change-type"), POST)
}

pub fn thread_mark_read(id: ThreadId) -> Endpoint {
    Endpoint::new(format!("threads/{id}/mark-read"), POST)
}

pub fn thread_move(id: ThreadId) -> Endpoint {
    Endpoint::new(format!("threads/{id}/move"), POST)
}

pub fn thread_posts(id: ThreadId) -> Endpoint {
    Endpoint::new(format!("threads/{id}/posts"), GET)
}

pub fn thread_vote(id: ThreadId) -> Endpoint {
    Endpoint::new(format!("threads/{id}/vote"), POST)
}

// Users

pub fn users() -> Endpoint {
    Endpoint::new("users", GET_POST)
}

pub fn users_find_email() -> Endpoint {
    Endpoint::new("users/find-email", GET)
}

pub fn users_find_name() -> Endpoint {
    Endpoint::new("users/find-name", GET)
}

pub fn user(id: UserId) -> Endpoint {
    Endpoint::new(format!("users/{id}"), GET_POST_DELETE)
}

pub fn user_avatar(id: UserId) -> Endpoint {
    Endpoint::new(format!("users/{id}/avatar"), POST_DELETE)
}

pub fn user_profile_posts(id: UserId) -> Endpoint {
    Endpoint::new(format!("users/{id}/profile-posts"), GET)
}

// Group management

pub fn promote_groups() -> Endpoint {
    Endpoint::new("promote", GET)
}

pub fn promote(id: UserId) -> Endpoint {
    Endpoint::new(format!("promote/{id}"), POST)
}

pub fn demote_groups() -> Endpoint {
    Endpoint::new("demote", GET)
}

pub fn demote(id: UserId) -> Endpoint {
    Endpoint::new(format!("demote/{id}"), POST)
}

/// Every endpoint in the registry, with templated ones filled by `id`.
pub fn all(id: u64) -> Vec<Endpoint> {
    vec![
        alerts(),
        alerts_mark_all(),
        alert(id.into()),
        alert_mark(id.into()),
        attachments(),
        attachments_new_key(),
        attachment(id.into()),
        attachment_data(id.into()),
        attachment_thumbnail(id.into()),
        auth(),
        auth_from_session(),
        auth_login_token(),
        conversation_messages(),
        conversation_message(id.into()),
        conversation_message_react(id.into()),
        conversations(),
        conversation(id.into()),
        conversation_invite(id.into()),
        conversation_mark_read(id.into()),
        conversation_mark_unread(id.into()),
        conversation_messages_list(id.into()),
        conversation_star(id.into()),
        forum(id.into()),
        forum_mark_read(id.into()),
        forum_threads(id.into()),
        index(),
        stats(),
        me(),
        me_avatar(),
        me_email(),
        me_password(),
        nodes(),
        nodes_flattened(),
        node(id.into()),
        posts(),
        post(id.into()),
        post_mark_solution(id.into()),
        post_react(id.into()),
        post_vote(id.into()),
        profile_post_comments(),
        profile_post_comment(id.into()),
        profile_post_comment_react(id.into()),
        profile_posts(),
        profile_post(id.into()),
        profile_post_comments_list(id.into()),
        profile_post_react(id.into()),
        threads(),
        thread(id.into()),
        thread_change_type(id.into()),
        thread_mark_read(id.into()),
        thread_move(id.into()),
        thread_posts(id.into()),
        thread_vote(id.into()),
        users(),
        users_find_email(),
        users_find_name(),
        user(id.into()),
        user_avatar(id.into()),
        user_profile_posts(id.into()),
        promote_groups(),
        promote(id.into()),
        demote_groups(),
        demote(id.into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templated_paths() {
        assert_eq!(thread(ThreadId(123)).path(), "threads/123");
        assert_eq!(
            conversation_mark_unread(ConversationId(9)).path(),
            "conversations/9/mark-unread"
        );
        assert_eq!(promote(UserId(5)).path(), "promote/5");
    }

    #[test]
    fn test_allowed_methods() {
        let ep = thread(ThreadId(1));
        assert!(ep.allows(Method::Get));
        assert!(ep.allows(Method::Post));
        assert!(ep.allows(Method::Delete));
        assert!(!ep.allows(Method::Put));

        assert_eq!(alerts_mark_all().methods(), &[Method::Post]);
        assert_eq!(attachment(AttachmentId(3)).methods(), &[Method::Get, Method::Delete]);
    }

    #[test]
    fn test_reserved_methods_are_never_allowed() {
        for ep in all(1) {
            for method in [Method::Put, Method::Patch, Method::Head, Method::Options] {
                assert!(!ep.allows(method), "{} allows {}", ep, method);
            }
            assert!(!ep.methods().is_empty(), "{} has no methods", ep);
        }
    }

    #[test]
    fn test_registry_paths_are_unique() {
        let endpoints = all(1);
        let mut paths: Vec<&str> = endpoints.iter().map(|e| e.path()).collect();
        let total = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }

    #[test]
    fn test_method_placement() {
        assert!(Method::Get.uses_query());
        assert!(Method::Delete.uses_query());
        assert!(!Method::Post.uses_query());
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
