//! API Tests

mod comment_tests;
mod follower_tests;
mod gateway_tests;
mod message_tests;
