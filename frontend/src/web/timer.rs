//! 定时器封装模块
//!
//! - [`Interval`]: 封装 `setInterval`，drop 时自动清除（首页轮播）
//! - [`Debouncer`]: 基于 `setTimeout` 的防抖器（商品搜索）

use std::time::Duration;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval` API。当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器；无法获取 window 或设置失败时返回 None
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let window = web_sys::window()?;

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .map_err(|e| tracing::warn!(error = ?e, "设置定时器失败"))
            .ok()?;

        Some(Self { handle, closure })
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，因为 drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 防抖器
///
/// 每次 [`call`](Self::call) 都会取消上一次尚未触发的回调，只有静默 `delay` 之后才真正执行。
/// 句柄存放在当前 Owner 下，组件卸载时随之释放。
#[derive(Clone, Copy)]
pub struct Debouncer {
    pending: StoredValue<Option<TimeoutHandle>, LocalStorage>,
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            pending: StoredValue::new_local(None),
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn call(&self, callback: impl FnOnce() + 'static) {
        self.cancel();
        match set_timeout_with_handle(callback, self.delay) {
            Ok(handle) => self.pending.set_value(Some(handle)),
            Err(e) => tracing::warn!(error = ?e, "设置防抖定时器失败"),
        }
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.try_get_value().flatten() {
            handle.clear();
        }
        self.pending.try_set_value(None);
    }
}
