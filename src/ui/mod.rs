/// UI module
///
/// View glue only: these functions render the current state and forward
/// user intent as messages. All state transitions live in `state` and
/// all external calls in `gemini` / `access`.

pub mod access_screen;
pub mod generator;
