//! In-memory repositories
//!
//! One store implements every repository trait with the same uniqueness,
//! counter, cascade, visibility and keyset rules as the PostgreSQL tables.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use social_server::domain::{
    Cursor, CursorPagination, Follow, FollowRepository, Message, MessageRepository,
    OffsetPagination, Post, PostKind, PostRepository, PostWithAuthor, Reaction, ReactionAction,
    ReactionRepository, User, UserRepository, Visibility,
};
use social_server::shared::error::AppError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    follows: Vec<Follow>,
    posts: Vec<Post>,
    reactions: Vec<Reaction>,
    messages: Vec<Message>,
}

impl Tables {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn post_mut(&mut self, id: Uuid) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    fn follows(&self, follower_id: Uuid, followed_id: Uuid) -> bool {
        self.follows
            .iter()
            .any(|f| f.follower_id == follower_id && f.followed_id == followed_id)
    }

    fn readable(&self, viewer: Uuid, author: &User) -> bool {
        author.id == viewer
            || author.visibility == Visibility::Public
            || (author.visibility == Visibility::Private && self.follows(viewer, author.id))
    }

    fn with_author(&self, post: &Post) -> Option<PostWithAuthor> {
        self.user(post.author_id).map(|author| PostWithAuthor {
            post: post.clone(),
            author: author.clone(),
        })
    }

    fn adjust_counter(&mut self, post_id: Uuid, action: ReactionAction, delta: i32) {
        if let Some(post) = self.post_mut(post_id) {
            let counter = match action {
                ReactionAction::Like => &mut post.qty_likes,
                ReactionAction::Retweet => &mut post.qty_retweets,
            };
            *counter = (*counter + delta).max(0);
        }
    }

    /// Remove posts and everything hanging off them, like `ON DELETE CASCADE`.
    fn cascade_posts(&mut self, mut doomed: HashSet<Uuid>) {
        loop {
            let children: Vec<Uuid> = self
                .posts
                .iter()
                .filter(|p| p.parent_post_id.is_some_and(|parent| doomed.contains(&parent)))
                .map(|p| p.id)
                .filter(|id| !doomed.contains(id))
                .collect();
            if children.is_empty() {
                break;
            }
            doomed.extend(children);
        }
        self.posts.retain(|p| !doomed.contains(&p.id));
        self.reactions.retain(|r| !doomed.contains(&r.post_id));
    }
}

/// Newest first, with the same cursor semantics as the SQL keyset queries.
fn keyset_page<T>(mut rows: Vec<T>, page: CursorPagination, id: impl Fn(&T) -> Uuid) -> Vec<T> {
    rows.sort_by_key(|row| std::cmp::Reverse(id(row)));
    let limit = page.limit as usize;
    match page.cursor {
        None => rows.into_iter().take(limit).collect(),
        Some(Cursor::After(cursor)) => rows
            .into_iter()
            .filter(|row| id(row) < cursor)
            .take(limit)
            .collect(),
        Some(Cursor::Before(cursor)) => {
            let mut newer: Vec<T> = rows
                .into_iter()
                .rev()
                .filter(|row| id(row) > cursor)
                .take(limit)
                .collect();
            newer.reverse();
            newer
        }
    }
}

fn offset_page<T>(rows: Vec<T>, page: OffsetPagination) -> Vec<T> {
    rows.into_iter()
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .collect()
}

fn newest_first<T>(mut rows: Vec<T>, id: impl Fn(&T) -> Uuid) -> Vec<T> {
    rows.sort_by_key(|row| std::cmp::Reverse(id(row)));
    rows
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a post, bypassing visibility rules.
    pub fn post(&self, id: Uuid) -> Option<Post> {
        self.tables.read().posts.iter().find(|p| p.id == id).cloned()
    }

    pub fn message_count(&self) -> usize {
        self.tables.read().messages.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.tables.write();
        if tables
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(AppError::Conflict(
                "User with this email or username already exists".into(),
            ));
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.tables.write();
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        if tables.user(id).is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }

        let parents: Vec<Uuid> = tables
            .posts
            .iter()
            .filter(|p| p.author_id == id)
            .filter_map(|p| p.parent_post_id)
            .collect();
        for parent in parents {
            if let Some(post) = tables.post_mut(parent) {
                post.qty_comments = (post.qty_comments - 1).max(0);
            }
        }

        let reactions: Vec<(Uuid, ReactionAction)> = tables
            .reactions
            .iter()
            .filter(|r| r.author_id == id)
            .map(|r| (r.post_id, r.action))
            .collect();
        for (post_id, action) in reactions {
            tables.adjust_counter(post_id, action, -1);
        }

        let own_posts: HashSet<Uuid> = tables
            .posts
            .iter()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        tables.cascade_posts(own_posts);
        tables.reactions.retain(|r| r.author_id != id);
        tables
            .follows
            .retain(|f| f.follower_id != id && f.followed_id != id);
        tables
            .messages
            .retain(|m| m.sender_id != id && m.receiver_id != id);
        tables.users.retain(|u| u.id != id);
        Ok(())
    }

    async fn search_by_username(
        &self,
        fragment: &str,
        viewer: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read();
        let needle = fragment.to_lowercase();
        let mut users: Vec<User> = tables
            .users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .filter(|u| u.visibility != Visibility::Hidden || u.id == viewer)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(offset_page(users, page))
    }

    async fn find_recommended(
        &self,
        user_id: Uuid,
        page: OffsetPagination,
    ) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read();
        let users: Vec<User> = tables
            .users
            .iter()
            .filter(|u| u.id != user_id && u.visibility != Visibility::Hidden)
            .filter(|u| !tables.follows(user_id, u.id))
            .cloned()
            .collect();
        Ok(offset_page(newest_first(users, |u| u.id), page))
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn create(&self, follow: &Follow) -> Result<Follow, AppError> {
        let mut tables = self.tables.write();
        if tables.user(follow.follower_id).is_none() || tables.user(follow.followed_id).is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }
        if tables.follows(follow.follower_id, follow.followed_id) {
            return Err(AppError::Conflict("Already following this user".into()));
        }
        tables.follows.push(follow.clone());
        Ok(follow.clone())
    }

    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write();
        let before = tables.follows.len();
        tables
            .follows
            .retain(|f| !(f.follower_id == follower_id && f.followed_id == followed_id));
        Ok(tables.follows.len() < before)
    }

    async fn exists(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.read().follows(follower_id, followed_id))
    }

    async fn find_following(&self, user_id: Uuid) -> Result<Vec<Follow>, AppError> {
        let tables = self.tables.read();
        let follows = tables
            .follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(follows, |f| f.id))
    }

    async fn find_followers(&self, user_id: Uuid) -> Result<Vec<Follow>, AppError> {
        let tables = self.tables.read();
        let follows = tables
            .follows
            .iter()
            .filter(|f| f.followed_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(follows, |f| f.id))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        let mut tables = self.tables.write();
        if tables.user(post.author_id).is_none() {
            return Err(AppError::NotFound("Author not found".into()));
        }
        if let Some(parent_id) = post.parent_post_id {
            let parent = tables
                .post_mut(parent_id)
                .ok_or_else(|| AppError::NotFound("Post not found".into()))?;
            parent.qty_comments += 1;
        }
        tables.posts.push(post.clone());
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.write();
        let parent = tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.parent_post_id)
            .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

        tables.cascade_posts(HashSet::from([id]));
        if let Some(parent) = parent.and_then(|parent_id| tables.post_mut(parent_id)) {
            parent.qty_comments = (parent.qty_comments - 1).max(0);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        Ok(self.post(id))
    }

    async fn find_feed(
        &self,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<PostWithAuthor>, AppError> {
        let tables = self.tables.read();
        let rows = tables
            .posts
            .iter()
            .filter(|p| !p.is_comment())
            .filter_map(|p| tables.with_author(p))
            .filter(|row| tables.readable(viewer, &row.author))
            .collect();
        Ok(keyset_page(rows, page, |row| row.post.id))
    }

    async fn find_by_author(
        &self,
        author_id: Uuid,
        kind: PostKind,
        page: CursorPagination,
    ) -> Result<Vec<Post>, AppError> {
        let tables = self.tables.read();
        let rows = tables
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .filter(|p| match kind {
                PostKind::Post => !p.is_comment(),
                PostKind::Comment => p.is_comment(),
            })
            .cloned()
            .collect();
        Ok(keyset_page(rows, page, |p| p.id))
    }

    async fn find_comments(
        &self,
        parent_id: Uuid,
        viewer: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<PostWithAuthor>, AppError> {
        let tables = self.tables.read();
        let rows = tables
            .posts
            .iter()
            .filter(|p| p.parent_post_id == Some(parent_id))
            .filter_map(|p| tables.with_author(p))
            .filter(|row| tables.readable(viewer, &row.author))
            .collect();
        Ok(keyset_page(rows, page, |row| row.post.id))
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn create(&self, reaction: &Reaction) -> Result<Reaction, AppError> {
        let mut tables = self.tables.write();
        if tables.user(reaction.author_id).is_none() || tables.post_mut(reaction.post_id).is_none()
        {
            return Err(AppError::NotFound("Post not found".into()));
        }
        if tables.reactions.iter().any(|r| {
            r.author_id == reaction.author_id
                && r.post_id == reaction.post_id
                && r.action == reaction.action
        }) {
            return Err(AppError::Conflict(format!(
                "Post already has your {}",
                reaction.action
            )));
        }
        tables.reactions.push(reaction.clone());
        tables.adjust_counter(reaction.post_id, reaction.action, 1);
        Ok(reaction.clone())
    }

    async fn delete(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        action: ReactionAction,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.write();
        let before = tables.reactions.len();
        tables
            .reactions
            .retain(|r| !(r.author_id == author_id && r.post_id == post_id && r.action == action));
        let removed = tables.reactions.len() < before;
        if removed {
            tables.adjust_counter(post_id, action, -1);
        }
        Ok(removed)
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Reaction>, AppError> {
        let tables = self.tables.read();
        let reactions = tables
            .reactions
            .iter()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect();
        Ok(newest_first(reactions, |r| r.id))
    }

    async fn find_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        action: Option<ReactionAction>,
    ) -> Result<Vec<Reaction>, AppError> {
        let tables = self.tables.read();
        let reactions = tables
            .reactions
            .iter()
            .filter(|r| r.author_id == author_id)
            .filter(|r| action.map_or(true, |a| r.action == a))
            .filter(|r| {
                tables
                    .posts
                    .iter()
                    .find(|p| p.id == r.post_id)
                    .and_then(|p| tables.user(p.author_id))
                    .is_some_and(|author| tables.readable(viewer, author))
            })
            .cloned()
            .collect();
        Ok(newest_first(reactions, |r| r.id))
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let mut tables = self.tables.write();
        if tables.user(message.sender_id).is_none() || tables.user(message.receiver_id).is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }
        tables.messages.push(message.clone());
        Ok(message.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, AppError> {
        let tables = self.tables.read();
        Ok(tables.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write();
        let before = tables.messages.len();
        tables.messages.retain(|m| m.id != id);
        Ok(tables.messages.len() < before)
    }

    async fn find_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
        page: CursorPagination,
    ) -> Result<Vec<Message>, AppError> {
        let tables = self.tables.read();
        let messages = tables
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect();
        Ok(keyset_page(messages, page, |m| m.id))
    }
}
