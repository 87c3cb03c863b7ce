pub mod cafe_store;
