//! 认证模块
//!
//! 管理用户会话，与路由系统解耦。
//! 路由服务通过注入的 [`SessionView`] 信号来检查登录状态与角色。

use atelier::media::MediaResolver;
use atelier::session::{AuthOutcome, AuthStore};
use atelier::shared::{Permission, User};
use atelier::{ClientConfig, StorefrontApi};
use leptos::prelude::*;

use crate::web::router::SessionView;
use crate::web::{BrowserStorage, FetchHttpClient};

pub type Api = StorefrontApi<FetchHttpClient>;

/// 页面主机名，用于判断是否在本地运行
fn current_hostname() -> String {
    web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default()
}

/// 认证上下文
///
/// 会话状态保存在信号中，通过 Context 在组件间共享。
/// 异步操作先取出一份 store 副本，完成后整体写回。
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: RwSignal<AuthStore<BrowserStorage>>,
    config: StoredValue<ClientConfig>,
}

impl AuthContext {
    /// 创建认证上下文并从 localStorage 恢复会话
    pub fn new() -> Self {
        let config = ClientConfig::from_env(&current_hostname());
        tracing::debug!(api = %config.api_base_url, "client configured");

        let mut store = AuthStore::new(BrowserStorage);
        store.hydrate();

        Self {
            store: RwSignal::new(store),
            config: StoredValue::new(config),
        }
    }

    /// 会话快照信号（用于路由服务注入）
    pub fn session_view(&self) -> Signal<SessionView> {
        let store = self.store;
        Signal::derive(move || {
            store.with(|s| SessionView {
                loading: s.is_loading(),
                user: s.user().cloned(),
            })
        })
    }

    pub fn user(&self) -> Option<User> {
        self.store.with(|s| s.user().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.with(|s| s.is_authenticated())
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.store.with(|s| s.can(permission))
    }

    /// 携带当前 token 的 API 客户端
    pub fn api(&self) -> Api {
        let token = self
            .store
            .with_untracked(|s| s.token().map(str::to_string));
        self.config
            .with_value(|c| StorefrontApi::new(FetchHttpClient, &c.api_base_url))
            .with_token(token)
    }

    pub fn media(&self) -> MediaResolver {
        self.config.with_value(ClientConfig::media)
    }

    /// 当前会话（用于结账校验）
    pub fn session(&self) -> Option<atelier::session::Session> {
        self.store.with_untracked(|s| s.session().cloned())
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome<User> {
        let api = self.api();
        let mut store = self.store.get_untracked();
        let outcome = store.login(&api, email, password).await;
        self.store.set(store);
        outcome
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AuthOutcome<()> {
        let api = self.api();
        let store = self.store.get_untracked();
        store.register(&api, name, email, password).await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> AuthOutcome<User> {
        let api = self.api();
        let mut store = self.store.get_untracked();
        let outcome = store.verify_otp(&api, email, otp).await;
        self.store.set(store);
        outcome
    }

    /// 注销并清除状态
    ///
    /// 受保护页面的跳转由路由服务监听会话变化自动处理。
    pub fn logout(&self) {
        self.store.update(|s| s.logout());
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
