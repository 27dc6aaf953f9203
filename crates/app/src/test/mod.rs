//! Integration test harness backed by a throw-away `PostgreSQL` database.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
