//! Shared test harness helpers.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use chrono::{DateTime, Utc};
use page_cache::{Clock, PageCache};
use uuid::Uuid;

use blog_service::store::{post_repo, user_repo};
use blog_service::{AppState, Config};

/// Manually advanced clock for driving page-cache TTLs.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc::now()),
        })
    }

    pub fn advance(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::seconds(secs);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn test_config() -> Config {
    Config::from_env().expect("default configuration loads")
}

pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(test_config()))
}

pub fn state_with_clock(clock: Arc<TestClock>) -> web::Data<AppState> {
    web::Data::new(AppState::with_cache(
        test_config(),
        Arc::new(PageCache::new(clock)),
    ))
}

/// Mirror a user the way the identity layer would on first sight.
pub fn seed_user(state: &AppState, username: &str) -> Uuid {
    user_repo::get_or_create_user(&state.store, username).id
}

pub fn seed_post(state: &AppState, author: Uuid, text: &str) -> u64 {
    post_repo::create_post(&state.store, author, text, None, None).id
}
