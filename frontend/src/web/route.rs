//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问要求。

use std::fmt::Display;

use atelier::api::{query_param, with_query};
use atelier::navigation::{self, Access};
use atelier::shared::Permission;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    Login,
    Register,
    /// 商品列表，可带分类筛选
    Selections { category: Option<String> },
    SelectionDetail(String),
    Checkout,
    /// 我的订单 (需要登录)
    Dashboard,
    /// 管理后台 (需要管理员)
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 与查询串解析为路由枚举
    pub fn from_location(path: &str, search: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            navigation::CATALOG_PATH => Self::Selections {
                category: query_param(search, "category").filter(|c| !c.is_empty()),
            },
            "/checkout" => Self::Checkout,
            "/dashboard" => Self::Dashboard,
            "/admin" => Self::Admin,
            _ => match path.strip_prefix("/selection/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Self::SelectionDetail(id.to_string())
                }
                _ => Self::NotFound,
            },
        }
    }

    /// 解析 `navigate` 收到的站内地址，如 `/selections?category=Saree`
    pub fn from_href(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, search)) => Self::from_location(path, search),
            None => Self::from_location(href, ""),
        }
    }

    /// 获取路由对应的 URL（含查询串）
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => navigation::HOME_PATH.to_string(),
            Self::Login => navigation::LOGIN_PATH.to_string(),
            Self::Register => "/register".to_string(),
            Self::Selections { category: None } => navigation::CATALOG_PATH.to_string(),
            Self::Selections {
                category: Some(category),
            } => with_query(navigation::CATALOG_PATH, &[("category", category)]),
            Self::SelectionDetail(id) => format!("/selection/{id}"),
            Self::Checkout => navigation::CHECKOUT_PATH.to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Admin => navigation::ADMIN_PATH.to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由所需的权限**
    ///
    /// 结账页本身公开，未登录时在提交那一刻才要求登录。
    pub fn access(&self) -> Access {
        match self {
            Self::Dashboard => Access::Requires(Permission::ViewOwnOrders),
            Self::Admin => Access::Requires(Permission::ManageCatalog),
            _ => Access::Public,
        }
    }

    /// 已登录用户应当离开的页面（登录/注册）
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
