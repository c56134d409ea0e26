mod calendar_tests;
mod confirm_tests;
