use leptos::prelude::*;

use crate::confirm::use_confirm;

/// 全局唯一的确认框，由 [`ConfirmService`](crate::confirm::ConfirmService) 驱动
#[component]
pub fn ConfirmDialog() -> impl IntoView {
    let confirm = use_confirm();

    view! {
        <Show when=move || confirm.pending().is_some()>
            <div class="modal modal-open">
                <div class="modal-box max-w-sm">
                    <h3 class="font-bold text-lg">"Are you sure?"</h3>
                    <p class="py-4">{move || confirm.pending().unwrap_or_default()}</p>
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| confirm.answer(false)>
                            "Cancel"
                        </button>
                        <button class="btn btn-error" on:click=move |_| confirm.answer(true)>
                            "Confirm"
                        </button>
                    </div>
                </div>
                <div class="modal-backdrop" on:click=move |_| confirm.answer(false)></div>
            </div>
        </Show>
    }
}
