use crate::record::{
    CommentRecord, CredentialsRecord, GroupRecord, PostRecord, SessionRecord, UserRecord,
};
use crate::schema::SCHEMA;
use federwerk_common::model::{
    Id, ModelValidationError,
    auth::{HashedPassword, Session, SessionTokenHash},
    comment::{Comment, CommentText},
    group::{CreateGroup, Group, GroupMarker, GroupSlug},
    page::{Page, page_bounds},
    post::{PartialPost, Post, PostDraft, PostMarker},
    user::{User, UserHandle, UserMarker},
};
use sqlx::{
    query, query_as, query_scalar,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use std::{num::NonZeroU32, str::FromStr};
use thiserror::Error;
use time::{PrimitiveDateTime, UtcDateTime};

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const POST_SELECT: &str = "
    SELECT
        posts.post_id,
        posts.text,
        posts.image,
        posts.published_at,
        users.user_id AS author_id,
        users.handle AS author_handle,
        \"groups\".group_id,
        \"groups\".title AS group_title,
        \"groups\".slug AS group_slug,
        \"groups\".description AS group_description
    FROM posts
        JOIN users ON users.user_id = posts.author_id
        LEFT JOIN \"groups\" ON \"groups\".group_id = posts.group_id
";

const POST_ORDER: &str = "ORDER BY posts.published_at DESC, posts.post_id DESC";

const COMMENT_SELECT: &str = "
    SELECT
        comments.comment_id,
        comments.post_id,
        comments.text,
        comments.created_at,
        users.user_id AS author_id,
        users.handle AS author_handle
    FROM comments
        JOIN users ON users.user_id = comments.author_id
";

#[derive(Clone, Debug)]
pub struct DbClient {
    pool: SqlitePool,
}

impl DbClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        Self::prepare(pool).await
    }

    /// A private in-memory database on a single-connection pool. More than
    /// one connection would each see their own empty database.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::prepare(pool).await
    }

    async fn prepare(pool: SqlitePool) -> Result<Self> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn create_user(
        &self,
        handle: &UserHandle,
        password_hash: &HashedPassword,
    ) -> Result<User> {
        let user_id: i64 = query_scalar(
            "INSERT INTO users (handle, password_hash) VALUES (?1, ?2) RETURNING user_id",
        )
        .bind(handle.get())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(User {
            id: user_id.into(),
            handle: handle.clone(),
        })
    }

    pub async fn fetch_user(&self, user_id: Id<UserMarker>) -> Result<Option<User>> {
        let record: Option<UserRecord> =
            query_as("SELECT user_id, handle FROM users WHERE user_id = ?1")
                .bind(user_id.get())
                .fetch_optional(&self.pool)
                .await?;

        Ok(record.map(User::try_from).transpose()?)
    }

    pub async fn fetch_user_by_handle(&self, handle: &UserHandle) -> Result<Option<User>> {
        let record: Option<UserRecord> =
            query_as("SELECT user_id, handle FROM users WHERE handle = ?1")
                .bind(handle.get())
                .fetch_optional(&self.pool)
                .await?;

        Ok(record.map(User::try_from).transpose()?)
    }

    pub async fn fetch_credentials(
        &self,
        handle: &UserHandle,
    ) -> Result<Option<(User, HashedPassword)>> {
        let record: Option<CredentialsRecord> =
            query_as("SELECT user_id, handle, password_hash FROM users WHERE handle = ?1")
                .bind(handle.get())
                .fetch_optional(&self.pool)
                .await?;

        Ok(record
            .map(<(User, HashedPassword)>::try_from)
            .transpose()?)
    }

    /// Posts, comments, sessions, and follow edges go with the user.
    pub async fn delete_user(&self, user_id: Id<UserMarker>) -> Result<()> {
        query("DELETE FROM users WHERE user_id = ?1")
            .bind(user_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn create_session(&self, session: &Session) -> Result<()> {
        query(
            "INSERT INTO sessions (token_hash, user_id, created_at, expires_after_seconds) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(session.token_hash.as_bytes())
        .bind(session.user.get())
        .bind(to_primitive(session.created_at))
        .bind(session.expires_after.map(|d| d.get().whole_seconds()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn fetch_session(&self, token_hash: &SessionTokenHash) -> Result<Option<Session>> {
        let record: Option<SessionRecord> = query_as(
            "SELECT user_id, token_hash, created_at, expires_after_seconds \
             FROM sessions WHERE token_hash = ?1",
        )
        .bind(token_hash.as_bytes())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Session::try_from).transpose()?)
    }

    pub async fn delete_session(&self, token_hash: &SessionTokenHash) -> Result<()> {
        query("DELETE FROM sessions WHERE token_hash = ?1")
            .bind(token_hash.as_bytes())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn create_group(&self, group: &CreateGroup) -> Result<Group> {
        let group_id: i64 = query_scalar(
            "INSERT INTO \"groups\" (title, slug, description) \
             VALUES (?1, ?2, ?3) RETURNING group_id",
        )
        .bind(&group.title)
        .bind(group.slug.get())
        .bind(&group.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(Group {
            id: group_id.into(),
            title: group.title.clone(),
            slug: group.slug.clone(),
            description: group.description.clone(),
        })
    }

    pub async fn fetch_groups(&self) -> Result<Vec<Group>> {
        let records: Vec<GroupRecord> = query_as(
            "SELECT group_id, title, slug, description FROM \"groups\" ORDER BY title, group_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(Group::try_from)
            .collect::<Result<_, _>>()?)
    }

    pub async fn fetch_group(&self, group_id: Id<GroupMarker>) -> Result<Option<Group>> {
        let record: Option<GroupRecord> = query_as(
            "SELECT group_id, title, slug, description FROM \"groups\" WHERE group_id = ?1",
        )
        .bind(group_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Group::try_from).transpose()?)
    }

    pub async fn fetch_group_by_slug(&self, slug: &GroupSlug) -> Result<Option<Group>> {
        let record: Option<GroupRecord> =
            query_as("SELECT group_id, title, slug, description FROM \"groups\" WHERE slug = ?1")
                .bind(slug.get())
                .fetch_optional(&self.pool)
                .await?;

        Ok(record.map(Group::try_from).transpose()?)
    }

    /// The group's posts survive with their group reference nulled.
    pub async fn delete_group(&self, group_id: Id<GroupMarker>) -> Result<()> {
        query("DELETE FROM \"groups\" WHERE group_id = ?1")
            .bind(group_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn create_post(
        &self,
        author_id: Id<UserMarker>,
        draft: &PostDraft,
    ) -> Result<PartialPost> {
        let published_at = to_primitive(UtcDateTime::now());

        let post_id: i64 = query_scalar(
            "INSERT INTO posts (author_id, group_id, text, image, published_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING post_id",
        )
        .bind(author_id.get())
        .bind(draft.group.map(Id::get))
        .bind(&draft.text)
        .bind(draft.image.as_deref())
        .bind(published_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(PartialPost {
            id: post_id.into(),
            author_id,
            group_id: draft.group,
            text: draft.text.clone(),
            image: draft.image.clone(),
            published_at: published_at.as_utc(),
        })
    }

    /// Author and publication timestamp are not editable.
    pub async fn update_post(&self, post_id: Id<PostMarker>, draft: &PostDraft) -> Result<()> {
        query("UPDATE posts SET text = ?2, group_id = ?3, image = ?4 WHERE post_id = ?1")
            .bind(post_id.get())
            .bind(&draft.text)
            .bind(draft.group.map(Id::get))
            .bind(draft.image.as_deref())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let record: Option<PostRecord> =
            query_as(&format!("{POST_SELECT} WHERE posts.post_id = ?1"))
                .bind(post_id.get())
                .fetch_optional(&self.pool)
                .await?;

        Ok(record.map(Post::try_from).transpose()?)
    }

    pub async fn fetch_posts_page(
        &self,
        requested: Option<u32>,
        page_size: NonZeroU32,
    ) -> Result<Page<Post>> {
        let total_items: i64 = query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        self.post_page(
            format!("{POST_SELECT} {POST_ORDER} LIMIT ?1 OFFSET ?2"),
            Vec::new(),
            requested,
            total_items,
            page_size,
        )
        .await
    }

    pub async fn fetch_group_posts_page(
        &self,
        group_id: Id<GroupMarker>,
        requested: Option<u32>,
        page_size: NonZeroU32,
    ) -> Result<Page<Post>> {
        let total_items: i64 = query_scalar("SELECT COUNT(*) FROM posts WHERE group_id = ?1")
            .bind(group_id.get())
            .fetch_one(&self.pool)
            .await?;

        self.post_page(
            format!("{POST_SELECT} WHERE posts.group_id = ?3 {POST_ORDER} LIMIT ?1 OFFSET ?2"),
            vec![group_id.get()],
            requested,
            total_items,
            page_size,
        )
        .await
    }

    pub async fn fetch_author_posts_page(
        &self,
        author_id: Id<UserMarker>,
        requested: Option<u32>,
        page_size: NonZeroU32,
    ) -> Result<Page<Post>> {
        let total_items: i64 = query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = ?1")
            .bind(author_id.get())
            .fetch_one(&self.pool)
            .await?;

        self.post_page(
            format!("{POST_SELECT} WHERE posts.author_id = ?3 {POST_ORDER} LIMIT ?1 OFFSET ?2"),
            vec![author_id.get()],
            requested,
            total_items,
            page_size,
        )
        .await
    }

    /// Posts by every author the user follows, newest first.
    pub async fn fetch_feed_page(
        &self,
        user_id: Id<UserMarker>,
        requested: Option<u32>,
        page_size: NonZeroU32,
    ) -> Result<Page<Post>> {
        let total_items: i64 = query_scalar(
            "SELECT COUNT(*) FROM posts WHERE author_id IN \
             (SELECT author_id FROM follows WHERE user_id = ?1)",
        )
        .bind(user_id.get())
        .fetch_one(&self.pool)
        .await?;

        self.post_page(
            format!(
                "{POST_SELECT} WHERE posts.author_id IN \
                 (SELECT follows.author_id FROM follows WHERE follows.user_id = ?3) \
                 {POST_ORDER} LIMIT ?1 OFFSET ?2"
            ),
            vec![user_id.get()],
            requested,
            total_items,
            page_size,
        )
        .await
    }

    async fn post_page(
        &self,
        sql: String,
        binds: Vec<i64>,
        requested: Option<u32>,
        total_items: i64,
        page_size: NonZeroU32,
    ) -> Result<Page<Post>> {
        let total_items = total_items.cast_unsigned();
        let bounds = page_bounds(requested, total_items, page_size);

        let mut records = query_as::<_, PostRecord>(&sql)
            .bind(i64::from(page_size.get()))
            .bind(bounds.offset.cast_signed());
        for bind in binds {
            records = records.bind(bind);
        }
        let records = records.fetch_all(&self.pool).await?;

        let items = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;

        Ok(Page {
            items,
            number: bounds.number,
            total_pages: bounds.total_pages,
            total_items,
        })
    }

    pub async fn create_comment(
        &self,
        post_id: Id<PostMarker>,
        author_id: Id<UserMarker>,
        text: &CommentText,
    ) -> Result<Comment> {
        let created_at = to_primitive(UtcDateTime::now());

        let comment_id: i64 = query_scalar(
            "INSERT INTO comments (post_id, author_id, text, created_at) \
             VALUES (?1, ?2, ?3, ?4) RETURNING comment_id",
        )
        .bind(post_id.get())
        .bind(author_id.get())
        .bind(text.get())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        let record: CommentRecord =
            query_as(&format!("{COMMENT_SELECT} WHERE comments.comment_id = ?1"))
                .bind(comment_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(record.try_into()?)
    }

    pub async fn fetch_post_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        let records: Vec<CommentRecord> = query_as(&format!(
            "{COMMENT_SELECT} WHERE comments.post_id = ?1 \
             ORDER BY comments.created_at, comments.comment_id"
        ))
        .bind(post_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(Comment::try_from)
            .collect::<Result<_, _>>()?)
    }

    /// Creates the follow edge unless it already exists. Uniqueness of the
    /// pair lives here, not in the schema. Returns whether a row was added.
    pub async fn follow(
        &self,
        user_id: Id<UserMarker>,
        author_id: Id<UserMarker>,
    ) -> Result<bool> {
        if self.is_following(user_id, author_id).await? {
            return Ok(false);
        }

        query("INSERT INTO follows (user_id, author_id) VALUES (?1, ?2)")
            .bind(user_id.get())
            .bind(author_id.get())
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    pub async fn unfollow(
        &self,
        user_id: Id<UserMarker>,
        author_id: Id<UserMarker>,
    ) -> Result<()> {
        query("DELETE FROM follows WHERE user_id = ?1 AND author_id = ?2")
            .bind(user_id.get())
            .bind(author_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn is_following(
        &self,
        user_id: Id<UserMarker>,
        author_id: Id<UserMarker>,
    ) -> Result<bool> {
        let following: bool = query_scalar(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE user_id = ?1 AND author_id = ?2)",
        )
        .bind(user_id.get())
        .bind(author_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(following)
    }
}

fn to_primitive(datetime: UtcDateTime) -> PrimitiveDateTime {
    PrimitiveDateTime::new(datetime.date(), datetime.time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use federwerk_common::model::auth::SessionToken;

    async fn client() -> DbClient {
        DbClient::connect_in_memory().await.expect("in-memory db")
    }

    async fn make_user(client: &DbClient, handle: &str) -> User {
        client
            .create_user(
                &UserHandle::new(handle.to_owned()).unwrap(),
                &HashedPassword::from("$argon2id$stub".to_owned()),
            )
            .await
            .unwrap()
    }

    async fn make_post(client: &DbClient, author: &User, text: &str) -> PartialPost {
        client
            .create_post(
                author.id,
                &PostDraft {
                    text: text.to_owned(),
                    group: None,
                    image: None,
                },
            )
            .await
            .unwrap()
    }

    async fn make_group(client: &DbClient, slug: &str) -> Group {
        client
            .create_group(&CreateGroup {
                title: format!("Group {slug}"),
                slug: GroupSlug::new(slug.to_owned()).unwrap(),
                description: "about".to_owned(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn users_roundtrip() {
        let client = client().await;
        let created = make_user(&client, "leo").await;

        let by_id = client.fetch_user(created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_handle = client
            .fetch_user_by_handle(&UserHandle::new("leo".to_owned()).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_handle, created);

        assert!(
            client
                .fetch_user_by_handle(&UserHandle::new("nobody".to_owned()).unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn sessions_roundtrip() {
        let client = client().await;
        let user = make_user(&client, "leo").await;

        let token = SessionToken::generate_random(user.id);
        let session = Session {
            user: user.id,
            token_hash: token.hash().unwrap(),
            created_at: UtcDateTime::now(),
            expires_after: None,
        };
        client.create_session(&session).await.unwrap();

        let fetched = client
            .fetch_session(&session.token_hash)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.user, user.id);
        assert_eq!(fetched.token_hash, session.token_hash);

        client.delete_session(&session.token_hash).await.unwrap();
        assert!(
            client
                .fetch_session(&session.token_hash)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn posts_list_newest_first() {
        let client = client().await;
        let author = make_user(&client, "leo").await;

        let first = make_post(&client, &author, "first").await;
        let second = make_post(&client, &author, "second").await;

        let page = client
            .fetch_posts_page(None, NonZeroU32::new(10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].id, second.id);
        assert_eq!(page.items[1].id, first.id);
        assert_eq!(page.items[0].author, author);
    }

    #[tokio::test]
    async fn pagination_sizes_and_clamping() {
        let client = client().await;
        let author = make_user(&client, "leo").await;
        for i in 0..7 {
            make_post(&client, &author, &format!("post {i}")).await;
        }
        let size = NonZeroU32::new(4).unwrap();

        let full = client.fetch_posts_page(None, size).await.unwrap();
        assert_eq!(full.items.len(), 4);
        assert_eq!(full.number, 1);
        assert_eq!(full.total_pages, 2);

        let last = client.fetch_posts_page(Some(2), size).await.unwrap();
        assert_eq!(last.items.len(), 3);

        let clamped = client.fetch_posts_page(Some(99), size).await.unwrap();
        assert_eq!(clamped.number, 2);
        assert_eq!(clamped.items, last.items);

        let below = client.fetch_posts_page(Some(0), size).await.unwrap();
        assert_eq!(below.number, 1);
    }

    #[tokio::test]
    async fn group_pages_only_contain_the_group() {
        let client = client().await;
        let author = make_user(&client, "leo").await;
        let group = make_group(&client, "rust").await;

        client
            .create_post(
                author.id,
                &PostDraft {
                    text: "in group".to_owned(),
                    group: Some(group.id),
                    image: None,
                },
            )
            .await
            .unwrap();
        make_post(&client, &author, "groupless").await;

        let page = client
            .fetch_group_posts_page(group.id, None, NonZeroU32::new(10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].text, "in group");
        assert_eq!(page.items[0].group.as_ref().unwrap().slug, group.slug);
    }

    #[tokio::test]
    async fn deleting_a_group_keeps_its_posts() {
        let client = client().await;
        let author = make_user(&client, "leo").await;
        let group = make_group(&client, "rust").await;

        let post = client
            .create_post(
                author.id,
                &PostDraft {
                    text: "survives".to_owned(),
                    group: Some(group.id),
                    image: None,
                },
            )
            .await
            .unwrap();

        client.delete_group(group.id).await.unwrap();

        let fetched = client.fetch_post(post.id).await.unwrap().unwrap();
        assert_eq!(fetched.text, "survives");
        assert_eq!(fetched.group, None);
    }

    #[tokio::test]
    async fn deleting_a_user_cascades() {
        let client = client().await;
        let author = make_user(&client, "leo").await;
        let commenter = make_user(&client, "mia").await;

        let post = make_post(&client, &author, "doomed").await;
        client
            .create_comment(
                post.id,
                commenter.id,
                &CommentText::new("me too".to_owned()).unwrap(),
            )
            .await
            .unwrap();
        client.follow(commenter.id, author.id).await.unwrap();

        client.delete_user(author.id).await.unwrap();

        assert!(client.fetch_post(post.id).await.unwrap().is_none());
        let comments: i64 = query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&client.pool)
            .await
            .unwrap();
        assert_eq!(comments, 0);
        assert!(!client.is_following(commenter.id, author.id).await.unwrap());
    }

    #[tokio::test]
    async fn following_twice_keeps_a_single_row() {
        let client = client().await;
        let follower = make_user(&client, "leo").await;
        let author = make_user(&client, "mia").await;

        assert!(client.follow(follower.id, author.id).await.unwrap());
        assert!(!client.follow(follower.id, author.id).await.unwrap());

        let rows: i64 = query_scalar("SELECT COUNT(*) FROM follows")
            .fetch_one(&client.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);

        client.unfollow(follower.id, author.id).await.unwrap();
        assert!(!client.is_following(follower.id, author.id).await.unwrap());
    }

    #[tokio::test]
    async fn feed_only_contains_followed_authors() {
        let client = client().await;
        let reader = make_user(&client, "reader").await;
        let followed = make_user(&client, "followed").await;
        let stranger = make_user(&client, "stranger").await;

        client.follow(reader.id, followed.id).await.unwrap();
        make_post(&client, &followed, "from followed").await;
        make_post(&client, &stranger, "from stranger").await;

        let page = client
            .fetch_feed_page(reader.id, None, NonZeroU32::new(10).unwrap())
            .await
            .unwrap();

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].text, "from followed");
    }

    #[tokio::test]
    async fn comments_attach_in_order() {
        let client = client().await;
        let author = make_user(&client, "leo").await;
        let post = make_post(&client, &author, "discuss").await;

        let first = client
            .create_comment(
                post.id,
                author.id,
                &CommentText::new("first".to_owned()).unwrap(),
            )
            .await
            .unwrap();
        client
            .create_comment(
                post.id,
                author.id,
                &CommentText::new("second".to_owned()).unwrap(),
            )
            .await
            .unwrap();

        let comments = client.fetch_post_comments(post.id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0], first);
        assert_eq!(comments[1].text.get(), "second");
    }

    #[tokio::test]
    async fn editing_keeps_author_and_timestamp() {
        let client = client().await;
        let author = make_user(&client, "leo").await;
        let post = make_post(&client, &author, "draft").await;
        let before = client.fetch_post(post.id).await.unwrap().unwrap();

        client
            .update_post(
                post.id,
                &PostDraft {
                    text: "final".to_owned(),
                    group: None,
                    image: Some("posts/cover.png".to_owned()),
                },
            )
            .await
            .unwrap();

        let fetched = client.fetch_post(post.id).await.unwrap().unwrap();
        assert_eq!(fetched.text, "final");
        assert_eq!(fetched.image.as_deref(), Some("posts/cover.png"));
        assert_eq!(fetched.author, author);
        assert_eq!(fetched.published_at, before.published_at);
    }
}
