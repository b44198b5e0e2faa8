//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use atelier::navigation::{self, GuardDecision, ReturnTo};
use atelier::shared::User;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器地址 (pathname, search)
fn current_location() -> (String, String) {
    let location = web_sys::window().map(|w| w.location());
    let path = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let search = location.and_then(|l| l.search().ok()).unwrap_or_default();
    (path, search)
}

fn current_route_from_location() -> AppRoute {
    let (path, search) = current_location();
    AppRoute::from_location(&path, &search)
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由守卫所需的会话快照，由认证模块注入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    /// 会话是否仍在恢复中
    pub loading: bool,
    pub user: Option<User>,
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: Signal<SessionView>,
    /// 被要求登录时记住的来源页
    return_to: RwSignal<ReturnTo>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `session` - 会话信号，由外部注入实现解耦
    fn new(session: Signal<SessionView>) -> Self {
        let (current_route, set_route) = signal(AppRoute::default());
        let router = Self {
            current_route,
            set_route,
            session,
            return_to: RwSignal::new(ReturnTo::default()),
        };

        // 初始化当前路由（从 URL 解析并经过守卫）
        let initial = current_route_from_location();
        router.navigate_to_route(initial, false);
        router
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 会话是否仍在恢复中（受保护页面此时显示加载状态）
    pub fn is_pending(&self) -> bool {
        self.session.with(|s| s.loading)
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, href: &str) {
        self.navigate_to_route(AppRoute::from_href(href), true);
    }

    /// 跳转登录页，登录成功后回到 `return_to`
    pub fn redirect_to_login(&self, return_to: &str) {
        self.return_to.update(|r| r.remember(return_to));
        self.navigate_to_route(AppRoute::Login, true);
    }

    /// 对目标路由执行守卫，返回最终应展示的路由
    fn resolve(&self, target: AppRoute) -> AppRoute {
        let session = self.session.get_untracked();

        // 已登录用户访问登录/注册页：按角色与来源页转走
        if target.is_auth_page() {
            if let Some(user) = &session.user {
                let return_to = self.return_to.try_update(|r| r.take()).flatten();
                let destination = navigation::post_login_destination(user.role, return_to.as_deref());
                return AppRoute::from_href(&destination);
            }
            return target;
        }

        let path = target.to_path();
        match navigation::guard(&path, target.access(), session.loading, session.user.as_ref()) {
            GuardDecision::Allow | GuardDecision::Pending => target,
            GuardDecision::Login { return_to } => {
                tracing::info!(%return_to, "[Router] Login required. Redirecting to Login.");
                self.return_to.update(|r| r.remember(&return_to));
                AppRoute::Login
            }
            GuardDecision::Deny => {
                tracing::warn!(%path, "[Router] Access Denied. Redirecting to Home.");
                AppRoute::Home
            }
        }
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        // --- Step 1: 验证目标路由 ---
        let route = self.resolve(target_route);

        // --- Step 2: 加载页面 (更新状态) ---
        let path = route.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        tracing::debug!(%path, "[Router] navigated");
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑，被拦截时替换掉当前历史记录
            let target = current_route_from_location();
            let route = router.resolve(target.clone());
            if route != target {
                replace_history_state(&route.to_path());
            }
            router.set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话变化时的自动重定向
    ///
    /// 登录成功时离开登录页；登出或会话恢复完成时重新校验当前页面。
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            router.session.track();
            let current = router.current_route.get_untracked();
            let route = router.resolve(current.clone());
            if route != current {
                tracing::info!(from = %current, to = %route, "[Router] Session changed, redirecting.");
                push_history_state(&route.to_path());
                router.set_route.set(route);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionView>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<SessionView>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        if current.access() != navigation::Access::Public && router.is_pending() {
            return view! {
                <div class="flex items-center justify-center min-h-[60vh]">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any();
        }
        matcher(current)
    }
}

/// 站内链接：拦截点击，交给路由服务处理
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        // 保留新标签页打开等浏览器默认行为
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
