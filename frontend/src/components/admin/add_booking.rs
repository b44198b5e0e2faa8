use atelier::admin::AdminBookingDraft;
use atelier::cart::VariantChoice;
use atelier::catalog::CatalogQuery;
use atelier::pricing::format_inr;
use atelier::shared::{DateRange, RentalDate, Selection, User, VariantAxis};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::{Close, Plus, Trash};
use crate::notify::use_notifier;

/// 代客下单对话框
///
/// 先选用户，再逐条添加商品（变体 + 租期），提交时每件商品单独建一条预订。
#[component]
pub fn AddBookingDialog(open: RwSignal<bool>, #[prop(into)] on_added: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let media = auth.media();

    let users = RwSignal::new(Vec::<User>::new());
    let selections = RwSignal::new(Vec::<Selection>::new());
    let loading_config = RwSignal::new(false);
    let submitting = RwSignal::new(false);

    let booking = RwSignal::new(AdminBookingDraft::new());
    let current_id = RwSignal::new(String::new());
    let choice = RwSignal::new(VariantChoice::default());
    let deliver_date = RwSignal::new(Option::<RentalDate>::None);
    let receive_date = RwSignal::new(Option::<RentalDate>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let reset_current = move || {
        current_id.set(String::new());
        choice.set(VariantChoice::default());
        deliver_date.set(None);
        receive_date.set(None);
    };

    // 每次打开都清空草稿并重新加载用户与商品
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        booking.set(AdminBookingDraft::new());
        reset_current();
        loading_config.set(true);
        spawn_local(async move {
            let api = auth.api();
            let loaded = async {
                let u = api.users().await?;
                let s = api.selections(&CatalogQuery::default()).await?;
                Ok::<_, atelier::ClientError>((u, s))
            }
            .await;
            match loaded {
                Ok((u, s)) => {
                    users.set(u);
                    selections.set(s);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load booking configuration");
                    notifier.error("Failed to load configuration");
                }
            }
            loading_config.set(false);
        });
    });

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let current = move || {
        current_id.with(|id| selections.with(|list| list.iter().find(|s| &s.id == id).cloned()))
    };

    let on_add_line = move |_| {
        let item = current();
        let dates = match (deliver_date.get_untracked(), receive_date.get_untracked()) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };
        let result = choice.with_untracked(|c| booking.try_update(|b| b.add_line(item.as_ref(), c, dates)));
        match result {
            Some(Ok(())) => reset_current(),
            Some(Err(e)) => notifier.error(e.to_string()),
            None => {}
        }
    };

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        spawn_local(async move {
            let api = auth.api();
            let draft = booking.get_untracked();
            match draft.submit(&api).await {
                Ok(()) => {
                    notifier.success("Bookings created successfully");
                    on_added.run(());
                    open.set(false);
                }
                Err(e) => {
                    tracing::error!(error = %e, "admin booking failed");
                    notifier.error(e.to_string());
                }
            }
            submitting.set(false);
        });
    };

    let variant_selects = move || {
        let Some(item) = current() else {
            return ().into_any();
        };
        VariantAxis::ALL
            .into_iter()
            .filter(|axis| item.offers(*axis))
            .map(|axis| {
                let options = item.options(axis).to_vec();
                view! {
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            let value = Some(event_target_value(&ev)).filter(|v| !v.is_empty());
                            choice.update(|c| c.set(axis, value));
                        }
                    >
                        <option value="">{axis.label()}</option>
                        {options.into_iter().map(|o| view! { <option value=o.clone()>{o.clone()}</option> }).collect_view()}
                    </select>
                }
            })
            .collect_view()
            .into_any()
    };

    let preview = {
        let media = media.clone();
        move || current().map(|item| media.primary_photo(&item))
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box max-w-4xl">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="font-bold text-lg">"New Admin Booking"</h3>
                    <button type="button" class="btn btn-sm btn-circle btn-ghost" on:click=move |_| open.set(false)>
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                <Show
                    when=move || !loading_config.get()
                    fallback=|| view! { <div class="text-center py-10">"Loading configuration..."</div> }
                >
                    <div class="grid md:grid-cols-2 gap-6">
                        // 左侧：用户与新增条目
                        <div class="space-y-4">
                            <label class="form-control">
                                <span class="label-text mb-1">"Select User"</span>
                                <select
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        let id = event_target_value(&ev);
                                        booking.update(|b| b.select_user(&id));
                                    }
                                >
                                    <option value="">"-- Choose User --"</option>
                                    <For
                                        each=move || users.get()
                                        key=|u| u.id.clone()
                                        children=|u| view! {
                                            <option value=u.id.clone()>{format!("{} ({})", u.name, u.email)}</option>
                                        }
                                    />
                                </select>
                            </label>

                            <div class="divider my-0"></div>

                            <div class="space-y-3">
                                <h4 class="font-semibold">"Add Item to Order"</h4>
                                <select
                                    class="select select-bordered w-full"
                                    prop:value=move || current_id.get()
                                    on:change=move |ev| {
                                        current_id.set(event_target_value(&ev));
                                        choice.set(VariantChoice::default());
                                    }
                                >
                                    <option value="">"-- Select Selection --"</option>
                                    <For
                                        each=move || selections.get()
                                        key=|s| s.id.clone()
                                        children=|s| {
                                            let sku = s.sku.clone().map(|k| format!(" - {k}")).unwrap_or_default();
                                            view! {
                                                <option value=s.id.clone()>
                                                    {format!("{}{} ({})", s.name, sku, format_inr(s.price as f64))}
                                                </option>
                                            }
                                        }
                                    />
                                </select>

                                <Show when=move || current_id.with(|id| !id.is_empty())>
                                    {
                                        let preview = preview.clone();
                                        move || preview().map(|src| view! {
                                            <img src=src alt="" class="w-full h-40 object-cover rounded-box" />
                                        })
                                    }
                                    <div class="grid grid-cols-2 gap-2">{variant_selects}</div>
                                    <div class="grid grid-cols-2 gap-2">
                                        <label class="form-control">
                                            <span class="label-text text-xs mb-1">"Delivery"</span>
                                            <input
                                                type="date"
                                                class="input input-bordered input-sm"
                                                prop:value=move || deliver_date.get().map(|d| d.to_input_value()).unwrap_or_default()
                                                on:change=move |ev| deliver_date.set(RentalDate::parse(&event_target_value(&ev)))
                                            />
                                        </label>
                                        <label class="form-control">
                                            <span class="label-text text-xs mb-1">"Return"</span>
                                            <input
                                                type="date"
                                                class="input input-bordered input-sm"
                                                prop:value=move || receive_date.get().map(|d| d.to_input_value()).unwrap_or_default()
                                                on:change=move |ev| receive_date.set(RentalDate::parse(&event_target_value(&ev)))
                                            />
                                        </label>
                                    </div>
                                    <button type="button" class="btn btn-sm btn-outline w-full gap-2" on:click=on_add_line>
                                        <Plus attr:class="h-4 w-4" />
                                        "Add to Cart"
                                    </button>
                                </Show>
                            </div>
                        </div>

                        // 右侧：本次预订汇总
                        <div class="bg-base-200 rounded-box p-4 space-y-3">
                            <div class="flex items-center justify-between">
                                <span class="font-semibold">"Booking Summary"</span>
                                <span class="badge">{move || format!("{} Items", booking.with(|b| b.lines().len()))}</span>
                            </div>
                            <Show
                                when=move || booking.with(|b| !b.lines().is_empty())
                                fallback=|| view! { <p class="text-sm opacity-60">"No items added yet."</p> }
                            >
                                <ul class="space-y-2">
                                    <For
                                        each=move || booking.with(|b| b.lines().to_vec())
                                        key=|line| line.unique_id.clone()
                                        children=move |line| {
                                            let unique_id = line.unique_id.clone();
                                            view! {
                                                <li class="bg-base-100 rounded p-2 text-sm flex gap-2">
                                                    <div class="flex-1">
                                                        <div class="font-medium">{line.item.name.clone()}</div>
                                                        <div class="opacity-60">{line.variant_summary()}</div>
                                                        <div class="opacity-60">{line.dates().map(|d| d.to_string())}</div>
                                                        <div class="font-semibold">{format_inr(line.price() as f64)}</div>
                                                    </div>
                                                    <button
                                                        type="button"
                                                        class="btn btn-ghost btn-xs text-error"
                                                        on:click=move |_| booking.update(|b| b.remove_line(&unique_id))
                                                    >
                                                        <Trash attr:class="h-4 w-4" />
                                                    </button>
                                                </li>
                                            }
                                        }
                                    />
                                </ul>
                            </Show>
                        </div>
                    </div>
                </Show>

                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="button" class="btn btn-primary" disabled=move || submitting.get() on:click=on_submit>
                        <Show when=move || submitting.get()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        "Create Booking"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
