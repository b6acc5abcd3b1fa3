mod admin_tests;
mod game_tests;
mod player_tests;
