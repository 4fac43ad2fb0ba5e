//! Smoke tests against a real forum.
//!
//! Reads `NIGHTFORO_API_KEY`, and optionally `NIGHTFORO_BASE_URL`,
//! `NIGHTFORO_USER_ID`, `NIGHTFORO_THREAD_ID` and `NIGHTFORO_USERNAME`, from the environment or a
//! `.env` file. Run with `cargo test -- --ignored`.

use std::env;

use nightforo::{NightForoClient, ThreadGetParams, UsersFindNameParams};

fn client() -> Option<NightForoClient> {
    dotenv::dotenv().ok();
    let key = env::var("NIGHTFORO_API_KEY").ok()?;

    let mut builder = NightForoClient::builder().api_key(key);
    if let Ok(url) = env::var("NIGHTFORO_BASE_URL") {
        builder = builder.base_url(url);
    }
    if let Some(user_id) = env::var("NIGHTFORO_USER_ID")
        .ok()
        .and_then(|id| id.parse::<u64>().ok())
    {
        builder = builder.super_user(user_id);
    }
    Some(builder.build().expect("client config from environment"))
}

#[tokio::test]
#[ignore]
async fn test_index_and_stats() {
    let Some(client) = client() else {
        eprintln!("NIGHTFORO_API_KEY not set, skipping");
        return;
    };

    let index = client.site().index().await.unwrap();
    println!("{} (version {})", index.site_title, index.version_id);

    let stats = client.site().stats().await.unwrap();
    assert!(stats.totals.users > 0);
}

#[tokio::test]
#[ignore]
async fn test_thread_with_posts() {
    let Some(client) = client() else {
        eprintln!("NIGHTFORO_API_KEY not set, skipping");
        return;
    };
    let Some(thread_id) = env::var("NIGHTFORO_THREAD_ID")
        .ok()
        .and_then(|id| id.parse::<u64>().ok())
    else {
        eprintln!("NIGHTFORO_THREAD_ID not set, skipping");
        return;
    };

    let result = client
        .threads()
        .get(
            thread_id,
            ThreadGetParams {
                with_posts: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(result.thread.thread_id.get(), thread_id);
    assert!(result.posts.is_some());
}

#[tokio::test]
#[ignore]
async fn test_find_user_by_name() {
    let Some(client) = client() else {
        eprintln!("NIGHTFORO_API_KEY not set, skipping");
        return;
    };
    let Ok(username) = env::var("NIGHTFORO_USERNAME") else {
        eprintln!("NIGHTFORO_USERNAME not set, skipping");
        return;
    };

    let result = client
        .users()
        .find_by_name(UsersFindNameParams::new(username.clone()))
        .await
        .unwrap();
    let exact = result.exact.expect("exact match for an existing username");
    assert!(exact.username.eq_ignore_ascii_case(&username));
}
