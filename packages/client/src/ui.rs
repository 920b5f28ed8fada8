//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after printing an event
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Prompt shown by the readline loop
pub fn prompt_for(email_id: &str, room_id: &str) -> String {
    format!("{}@{}> ", email_id, room_id)
}
