//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own parsing orchestration and storage so route handlers
//! can stay focused on protocol translation.

pub mod design;
