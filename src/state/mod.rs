/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The generation session: gallery, selection and the single
///   generation slot (session.rs)

pub mod data;
pub mod session;
