//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{
    AdminDashboard, AdminEventCreate, AdminEventEdit, AdminEvents, AdminLayout, EventDetail,
    Events, ForgotPassword, Home, Login, MainLayout, NotFound, Profile, Register, RequireAuth,
    ResendVerification, ResetPassword, VerifyEmail,
};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(MainLayout)]
        #[route("/")]
        Home {},
        #[route("/events")]
        Events {},
        #[route("/events/:id")]
        EventDetail { id: i64 },

        // Auth routes
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/forgot-password")]
        ForgotPassword {},
        #[route("/reset-password/:token")]
        ResetPassword { token: String },
        #[route("/verify-email/:token")]
        VerifyEmail { token: String },
        #[route("/resend-verification")]
        ResendVerification {},

        // Signed-in users
        #[layout(RequireAuth)]
            #[route("/profile")]
            Profile {},
        #[end_layout]

        // Administrators
        #[nest("/admin")]
            #[layout(AdminLayout)]
                #[route("/")]
                AdminDashboard {},
                #[route("/events")]
                AdminEvents {},
                #[route("/events/new")]
                AdminEventCreate {},
                #[route("/events/:id/edit")]
                AdminEventEdit { id: i64 },
            #[end_layout]
        #[end_nest]

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}
