mod builder_tests;
mod merge_tests;
mod render_tests;
