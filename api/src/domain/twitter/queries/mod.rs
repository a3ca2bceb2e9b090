pub mod tweets;
