//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::auth::firebase::FirebaseAuth;
use crate::components::session_provider::SessionProvider;
use crate::components::site_header::SiteHeader;
use crate::components::toast_host::ToastHost;
use crate::config::AppConfig;
use crate::pages::{
    dashboard::DashboardPage, login::LoginPage, register::RegisterPage, verify_email::VerifyEmailPage,
};
use crate::state::toast::ToastState;
use crate::util::auth::DASHBOARD_ROUTE;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides config, the auth client, and the toast stack, then mounts the
/// session provider around the router. Each render builds its own
/// `FirebaseAuth`, so server renders never share a session.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    let auth = FirebaseAuth::new(config.clone());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(config);
    provide_context(auth.clone());
    provide_context(toasts);

    // The server never knows the browser session; it renders the loading
    // state and the client resolves it after hydration.
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move { auth.restore().await });
    #[cfg(not(feature = "hydrate"))]
    drop(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="Student Portal"/>

        <SessionProvider>
            <Router>
                <SiteHeader/>
                <main class="app-main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("register") view=RegisterPage/>
                        <Route path=StaticSegment("verify-email") view=VerifyEmailPage/>
                        <Route path=StaticSegment("dashboard") view=DashboardPage/>
                        <Route path=StaticSegment("") view=|| view! { <Redirect path=DASHBOARD_ROUTE/> }/>
                    </Routes>
                </main>
                <ToastHost/>
            </Router>
        </SessionProvider>
    }
}
