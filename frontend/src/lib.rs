//! Atelier 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth` / `cart`: 会话与购物车上下文，状态逻辑来自核心库 `atelier`
//! - `notify` / `confirm`: 全局提示与确认框
//! - `components`: UI 组件层

mod auth;
mod cart;
mod confirm;
pub mod logging;
mod notify;
mod components {
    pub mod admin;
    pub mod cart_drawer;
    pub mod checkout;
    pub mod confirm_dialog;
    pub mod dashboard;
    pub mod home;
    pub mod icons;
    pub mod layout;
    pub mod login;
    pub mod register;
    pub mod selection_details;
    pub mod selections;
}

use crate::auth::AuthContext;
use crate::cart::CartContext;
use crate::components::admin::AdminDashboardPage;
use crate::components::cart_drawer::CartDrawer;
use crate::components::checkout::CheckoutPage;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::layout::{Footer, Navbar};
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::selection_details::SelectionDetailsPage;
use crate::components::selections::SelectionsPage;
use crate::confirm::ConfirmService;
use crate::notify::{Notifier, Toaster};

use leptos::prelude::*;

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量级封装，并实现核心库的 HTTP 与存储抽象。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::{FetchHttpClient, read_file};
    pub use storage::BrowserStorage;
    pub use timer::{Debouncer, Interval};
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Selections { category } => view! { <SelectionsPage category=category /> }.into_any(),
        AppRoute::SelectionDetail(id) => view! { <SelectionDetailsPage id=id /> }.into_any(),
        AppRoute::Checkout => view! { <CheckoutPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 全局提示与确认框服务
    let notifier = Notifier::new();
    provide_context(notifier);
    provide_context(ConfirmService::new());

    // 2. 创建认证上下文（从 localStorage 恢复会话）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 3. 购物车上下文
    provide_context(CartContext::new(notifier));

    // 4. 获取会话信号，用于注入路由服务（解耦！）
    let session = auth_ctx.session_view();

    view! {
        // 5. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <div class="min-h-screen flex flex-col bg-base-100">
                <Navbar />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
            <CartDrawer />
            <ConfirmDialog />
            <Toaster />
        </Router>
    }
}
