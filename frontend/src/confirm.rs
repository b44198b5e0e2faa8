//! 全局确认框服务
//!
//! 唯一的确认框由应用根部的 [`ConfirmDialog`](crate::components::confirm_dialog::ConfirmDialog)
//! 持有并渲染。调用方通过 [`ConfirmService::ask`] 发出请求，并在回调中拿到用户的选择。
//! 同一时间只有一个请求；新的请求会把尚未回答的旧请求视为取消。

use leptos::prelude::*;

type Responder = Box<dyn FnOnce(bool)>;

#[derive(Clone, Copy)]
pub struct ConfirmService {
    message: RwSignal<Option<String>>,
    responder: StoredValue<Option<Responder>, LocalStorage>,
}

impl ConfirmService {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            responder: StoredValue::new_local(None),
        }
    }

    /// 显示确认框，用户确认时 `on_answer(true)`，取消时 `on_answer(false)`
    pub fn ask(&self, message: impl Into<String>, on_answer: impl FnOnce(bool) + 'static) {
        if let Some(previous) = self.take_responder() {
            previous(false);
        }
        self.responder.set_value(Some(Box::new(on_answer)));
        self.message.set(Some(message.into()));
    }

    /// 只关心确认分支时的简写
    pub fn confirm(&self, message: impl Into<String>, on_confirm: impl FnOnce() + 'static) {
        self.ask(message, move |confirmed| {
            if confirmed {
                on_confirm();
            }
        });
    }

    /// 当前待回答的消息
    pub fn pending(&self) -> Option<String> {
        self.message.get()
    }

    /// 回答当前请求并关闭确认框
    pub fn answer(&self, confirmed: bool) {
        self.message.set(None);
        if let Some(respond) = self.take_responder() {
            respond(confirmed);
        }
    }

    fn take_responder(&self) -> Option<Responder> {
        self.responder
            .try_update_value(|slot| slot.take())
            .flatten()
    }
}

pub fn use_confirm() -> ConfirmService {
    expect_context::<ConfirmService>()
}
