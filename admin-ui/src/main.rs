//! Voice Agent Admin
//!
//! Browser front end for the voice-agent backend, built with Leptos (WASM).
//!
//! # Features
//!
//! - Email/password sign-in with a persisted session
//! - Business profile and booking rules editing
//! - Knowledge base and services management
//! - Dashboard totals and the call log
//!
//! # Architecture
//!
//! A client-side rendered Leptos application. Requests, the route guard,
//! form validation and display formatting all come from the
//! `voiceagent-admin` library; this crate only adds the reactive views and
//! a `localStorage` home for the session.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
