use atelier::navigation;
use atelier::shared::{Permission, Role};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::cart::use_cart;
use crate::components::icons::{LogOut, ShoppingCart, UserIcon};
use crate::web::router::{Link, use_router};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let cart = use_cart();
    let router = use_router();

    let is_admin = move || auth.can(Permission::ManageCatalog);
    let is_customer = move || auth.user().is_some_and(|u| u.role != Role::Admin);
    let user_name = move || auth.user().map(|u| u.name).unwrap_or_default();
    let cart_count = move || cart.len();

    let on_logout = move |_| {
        auth.logout();
        router.navigate(navigation::HOME_PATH);
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm sticky top-0 z-40 px-4 md:px-8">
            <div class="flex-1">
                <Link to=navigation::HOME_PATH class="btn btn-ghost text-2xl font-serif tracking-wide">
                    "Selection" <span class="text-primary">"."</span>
                </Link>
            </div>
            <div class="flex-none hidden md:flex">
                <ul class="menu menu-horizontal px-1">
                    <li><Link to=navigation::HOME_PATH>"Home"</Link></li>
                    <li><Link to=navigation::CATALOG_PATH>"Selections"</Link></li>
                    <Show when=is_customer>
                        <li><Link to="/dashboard">"Orders"</Link></li>
                    </Show>
                    <Show when=is_admin>
                        <li><Link to=navigation::ADMIN_PATH>"Admin Panel"</Link></li>
                    </Show>
                </ul>
            </div>
            <div class="flex-none gap-2">
                <button class="btn btn-ghost btn-circle" on:click=move |_| cart.toggle()>
                    <div class="indicator">
                        <ShoppingCart attr:class="h-6 w-6" />
                        <Show when=move || { cart_count() > 0 }>
                            <span class="badge badge-sm badge-primary indicator-item">{cart_count}</span>
                        </Show>
                    </div>
                </button>
                <Show
                    when=move || auth.is_authenticated()
                    fallback=|| view! {
                        <Link to=navigation::LOGIN_PATH class="btn btn-primary btn-sm">"Login"</Link>
                    }
                >
                    <span class="hidden md:flex items-center gap-1 text-sm opacity-80">
                        <UserIcon attr:class="h-4 w-4" />
                        {user_name}
                    </span>
                    <button class="btn btn-ghost btn-sm gap-2" on:click=on_logout>
                        <LogOut attr:class="h-4 w-4" />
                        "Logout"
                    </button>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-8 bg-base-200 text-base-content mt-12">
            <aside>
                <p class="font-serif text-xl">"Selection" <span class="text-primary">"."</span></p>
                <p class="text-sm opacity-70">"Designer wear for every occasion, on rent."</p>
            </aside>
            <nav class="grid grid-flow-col gap-4">
                <Link to=navigation::HOME_PATH class="link link-hover">"Home"</Link>
                <Link to=navigation::CATALOG_PATH class="link link-hover">"Selections"</Link>
                <Link to="/dashboard" class="link link-hover">"My Orders"</Link>
            </nav>
        </footer>
    }
}
