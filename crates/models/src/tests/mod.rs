/// Entity serialization and input validation tests
pub mod cafe_tests;
