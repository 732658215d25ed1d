//! Page chrome and route guards.

use dioxus::prelude::*;
use eventnow_core::config::APP_NAME;

use crate::auth_session::use_auth;
use crate::components::ui::PageSpinner;
use crate::Route;

/// Outermost layout: navbar, page outlet and footer.
///
/// Lives inside the router, so this is where forced logouts learn how to
/// navigate back to the login page.
#[component]
pub fn MainLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    use_hook(|| auth.install_navigation(nav));

    rsx! {
        div { class: "min-h-screen flex flex-col bg-gray-50 text-gray-900",
            Navbar {}
            main { class: "flex-1 w-full max-w-6xl mx-auto px-4 py-8", Outlet::<Route> {} }
            footer { class: "border-t border-gray-200 py-6 text-center text-sm text-gray-500",
                "© {APP_NAME}"
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    let auth = use_auth();
    let route: Route = use_route();
    let user = auth.user();
    let is_admin = auth.is_admin();

    let link = |active: bool| {
        if active {
            "px-3 py-2 rounded-md text-sm font-medium text-indigo-600 bg-indigo-50"
        } else {
            "px-3 py-2 rounded-md text-sm font-medium text-gray-600 hover:text-gray-900 hover:bg-gray-100"
        }
    };

    rsx! {
        nav { class: "bg-white border-b border-gray-200",
            div { class: "max-w-6xl mx-auto px-4 h-16 flex items-center justify-between",
                div { class: "flex items-center gap-6",
                    Link { to: Route::Home {}, class: "text-xl font-bold text-indigo-600", "{APP_NAME}" }
                    Link {
                        to: Route::Events {},
                        class: link(matches!(route, Route::Events {} | Route::EventDetail { .. })),
                        "Events"
                    }
                    if is_admin {
                        Link {
                            to: Route::AdminDashboard {},
                            class: link(
                                matches!(
                                    route,
                                    Route::AdminDashboard {}
                                    | Route::AdminEvents {}
                                    | Route::AdminEventCreate {}
                                    | Route::AdminEventEdit { .. }
                                ),
                            ),
                            "Admin"
                        }
                    }
                }
                div { class: "flex items-center gap-2",
                    if let Some(user) = user {
                        Link {
                            to: Route::Profile {},
                            class: link(matches!(route, Route::Profile {})),
                            "{user.display_name()}"
                        }
                        button {
                            class: "px-3 py-2 rounded-md text-sm font-medium text-gray-600 hover:text-red-600",
                            r#type: "button",
                            onclick: move |_| auth.logout(),
                            "Log out"
                        }
                    } else {
                        Link { to: Route::Login {}, class: link(matches!(route, Route::Login {})), "Log in" }
                        Link {
                            to: Route::Register {},
                            class: "px-3 py-2 rounded-md text-sm font-semibold text-white bg-indigo-600 hover:bg-indigo-500",
                            "Sign up"
                        }
                    }
                }
            }
        }
    }
}

/// Guard for signed-in pages. Waits for the session restore before deciding.
#[component]
pub fn RequireAuth() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let waiting = auth.is_loading();
    let allowed = auth.is_authenticated();

    let state = auth.state;
    use_effect(move || {
        let session = state.read();
        if !session.loading && !session.is_authenticated() {
            nav.replace(Route::Login {});
        }
    });

    if waiting || !allowed {
        return rsx! { PageSpinner {} };
    }

    rsx! { Outlet::<Route> {} }
}

/// Guard for `/admin`: anonymous users go to the login page, signed-in
/// non-admins go home.
#[component]
pub fn AdminLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route: Route = use_route();

    let waiting = auth.is_loading();
    let allowed = auth.is_admin();

    let state = auth.state;
    use_effect(move || {
        let session = state.read();
        if session.loading {
            return;
        }
        if !session.is_authenticated() {
            nav.replace(Route::Login {});
        } else if !session.is_admin() {
            nav.replace(Route::Home {});
        }
    });

    if waiting || !allowed {
        return rsx! { PageSpinner {} };
    }

    let tab = |active: bool| {
        if active {
            "px-4 py-2 text-sm font-medium border-b-2 border-indigo-600 text-indigo-600"
        } else {
            "px-4 py-2 text-sm font-medium border-b-2 border-transparent text-gray-500 hover:text-gray-700"
        }
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex gap-2 border-b border-gray-200",
                Link { to: Route::AdminDashboard {}, class: tab(matches!(route, Route::AdminDashboard {})), "Dashboard" }
                Link {
                    to: Route::AdminEvents {},
                    class: tab(!matches!(route, Route::AdminDashboard {})),
                    "Events"
                }
            }
            Outlet::<Route> {}
        }
    }
}
