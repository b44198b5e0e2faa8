use atelier::orders::{Applied, OrderDesk, StatusAxis, StatusChange};
use atelier::pricing::{OrderTotals, format_inr};
use atelier::shared::{OrderDetail, OrderItem, RentalDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::order_editor::OrderItemEditor;
use crate::auth::use_auth;
use crate::components::icons::{Close, Pencil, Trash};
use crate::confirm::use_confirm;
use crate::notify::{Notifier, use_notifier};

pub(crate) fn format_day(date: Option<RentalDate>) -> String {
    date.map(|d| d.display_long()).unwrap_or_else(|| "N/A".to_string())
}

/// 尺码与颜色标签，如 `T: M`、`B: 32`、`Red`
pub(crate) fn spec_tags(item: &OrderItem) -> Vec<String> {
    [
        item.top_size.as_ref().map(|s| format!("T: {s}")),
        item.bottom_size.as_ref().map(|s| format!("B: {s}")),
        item.color.clone(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect()
}

/// 修改已生效后落地重新拉取的整单；拉取失败单独提示，不覆盖成功提示
pub(crate) fn settle_refresh(applied: Applied, detail: RwSignal<Option<OrderDetail>>, notifier: Notifier) {
    match applied.refreshed {
        Ok(data) => detail.set(Some(data)),
        Err(e) => {
            tracing::error!(error = %e, "order refresh failed");
            notifier.error("Failed to refresh order details");
        }
    }
}

/// 订单详情弹窗
///
/// 顾客与后台共用；`manage` 为 true 时每个订单项可改状态、编辑或移除。
/// 所有修改成功后都以服务端重新返回的整单为准。
#[component]
pub fn OrderDetailsModal(
    /// 要查看的订单，设为 None 即关闭
    order_id: RwSignal<Option<String>>,
    #[prop(optional)] manage: bool,
) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let confirm = use_confirm();

    let detail = RwSignal::new(Option::<OrderDetail>::None);
    let loading = RwSignal::new(false);
    let editing = RwSignal::new(Option::<String>::None);

    Effect::new(move |_| {
        let Some(id) = order_id.get() else {
            detail.set(None);
            editing.set(None);
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let api = auth.api();
            match OrderDesk::new(&api).detail(&id).await {
                Ok(data) => detail.set(Some(data)),
                Err(e) => {
                    tracing::error!(error = %e, order = %id, "failed to load order detail");
                    notifier.error("Failed to load details");
                    detail.set(None);
                }
            }
            loading.set(false);
        });
    });

    let close = move || order_id.set(None);

    let on_status = move |item_id: String, axis: StatusAxis, value: String| {
        let Some(change) = StatusChange::parse(axis, &value) else {
            detail.update(|_| {});
            return;
        };
        let Some(id) = order_id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let api = auth.api();
            match OrderDesk::new(&api).change_status(&id, &item_id, change).await {
                Ok(applied) => {
                    notifier.success(format!("{} updated", axis.field().replace('_', " ")));
                    settle_refresh(applied, detail, notifier);
                }
                Err(e) => {
                    tracing::error!(error = %e, item = %item_id, "status update failed");
                    notifier.error("Failed to update");
                    // 重新渲染，下拉框回到服务端的值
                    detail.update(|_| {});
                }
            }
        });
    };

    let on_remove = move |item_id: String| {
        let Some(id) = order_id.get_untracked() else {
            return;
        };
        confirm.confirm("Are you sure you want to remove this item?", move || {
            spawn_local(async move {
                let api = auth.api();
                match OrderDesk::new(&api).remove_item(&id, &item_id).await {
                    Ok(applied) => {
                        notifier.success("Item removed");
                        settle_refresh(applied, detail, notifier);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, item = %item_id, "remove item failed");
                        notifier.error("Failed to remove item");
                    }
                }
            });
        });
    };

    let short_code = move || {
        detail.with(|d| d.as_ref().map(|d| d.order.short_code()).unwrap_or_default())
    };

    let item_row = move |item: OrderItem| {
        let item_id = item.id.clone();
        let name = item
            .selection
            .selection()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Unknown item".to_string());
        let sku = item.selection.selection().and_then(|s| s.sku.clone());
        let tags = spec_tags(&item);

        let status_cells = StatusAxis::ALL
            .into_iter()
            .map(|axis| {
                let current = axis.current(&item);
                let placeholder = axis.needs_placeholder(&item);
                if !manage {
                    return view! {
                        <td><span class="badge badge-outline capitalize">{current}</span></td>
                    }
                    .into_any();
                }
                let item_id = item_id.clone();
                view! {
                    <td>
                        <select
                            class="select select-bordered select-sm"
                            prop:value=current
                            on:change=move |ev| on_status(item_id.clone(), axis, event_target_value(&ev))
                        >
                            {placeholder.then(|| view! {
                                <option value=current selected=true disabled=true>"Unknown"</option>
                            })}
                            {axis
                                .options()
                                .into_iter()
                                .map(|(value, label)| view! {
                                    <option value=value selected={value == current}>{label}</option>
                                })
                                .collect_view()}
                        </select>
                    </td>
                }
                .into_any()
            })
            .collect_view();

        let actions = manage.then(|| {
            let edit_id = item_id.clone();
            let remove_id = item_id.clone();
            view! {
                <td>
                    <div class="flex gap-1">
                        <button class="btn btn-ghost btn-xs" title="Edit" on:click=move |_| editing.set(Some(edit_id.clone()))>
                            <Pencil attr:class="h-4 w-4" />
                        </button>
                        <button class="btn btn-ghost btn-xs text-error" title="Delete" on:click=move |_| on_remove(remove_id.clone())>
                            <Trash attr:class="h-4 w-4" />
                        </button>
                    </div>
                </td>
            }
        });

        view! {
            <tr>
                <td>
                    <div class="font-medium">{name}</div>
                    {sku.map(|sku| view! { <div class="text-xs opacity-60">"SKU: " {sku}</div> })}
                </td>
                <td>
                    <div class="flex flex-wrap gap-1">
                        {tags.into_iter().map(|t| view! { <span class="badge badge-ghost badge-sm">{t}</span> }).collect_view()}
                    </div>
                </td>
                <td class="text-xs">
                    <div>"From: " {format_day(item.deliver_date)}</div>
                    <div>"To: " {format_day(item.receive_date)}</div>
                </td>
                {status_cells}
                {actions}
            </tr>
        }
    };

    view! {
        <Show when=move || order_id.with(Option::is_some)>
            <div class="modal modal-open">
                <div class="modal-box max-w-5xl">
                    <div class="flex items-center justify-between mb-4">
                        <h3 class="font-bold text-lg">
                            "Order Details "
                            <span class="opacity-60">"#" {short_code}</span>
                        </h3>
                        <button class="btn btn-sm btn-circle btn-ghost" on:click=move |_| close()>
                            <Close attr:class="h-5 w-5" />
                        </button>
                    </div>

                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="flex justify-center py-12">
                                <span class="loading loading-spinner loading-lg"></span>
                            </div>
                        }
                    >
                        {move || match detail.get() {
                            None => view! { <div class="text-center py-12">"Order not found"</div> }.into_any(),
                            Some(data) => {
                                let totals = OrderTotals::from_order(&data.order);
                                let customer = data.order.user.clone();
                                let order_key = data.order.id.clone();
                                view! {
                                    <div class="stats stats-vertical md:stats-horizontal shadow w-full mb-6">
                                        {(manage).then(|| view! {
                                            <div class="stat">
                                                <div class="stat-title">"User Info"</div>
                                                <div class="stat-value text-base">
                                                    {customer.as_ref().and_then(|u| u.name().map(str::to_string)).unwrap_or_default()}
                                                </div>
                                                <div class="stat-desc">
                                                    {customer.as_ref().and_then(|u| u.email().map(str::to_string)).unwrap_or_default()}
                                                </div>
                                            </div>
                                        })}
                                        <div class="stat">
                                            <div class="stat-title">"Subtotal"</div>
                                            <div class="stat-value text-base">{format_inr(totals.rent)}</div>
                                        </div>
                                        <div class="stat">
                                            <div class="stat-title">"Deposit (50%)"</div>
                                            <div class="stat-value text-base">{format_inr(totals.deposit)}</div>
                                        </div>
                                        <div class="stat">
                                            <div class="stat-title">"Total Amount"</div>
                                            <div class="stat-value text-base text-primary">{format_inr(totals.total)}</div>
                                        </div>
                                        <div class="stat">
                                            <div class="stat-title">"Total Items"</div>
                                            <div class="stat-value text-base">{data.order.items_count}</div>
                                            <div class="stat-desc">"Items in this order"</div>
                                        </div>
                                    </div>

                                    <h4 class="font-semibold mb-2">"Ordered Items"</h4>
                                    <div class="overflow-x-auto">
                                        <table class="table table-sm">
                                            <thead>
                                                <tr>
                                                    <th>"Item"</th>
                                                    <th>"Specs"</th>
                                                    <th>"Dates"</th>
                                                    {StatusAxis::ALL.into_iter().map(|a| view! { <th>{a.label()}</th> }).collect_view()}
                                                    {manage.then(|| view! { <th>"Actions"</th> })}
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {data
                                                    .items
                                                    .into_iter()
                                                    .map(|item| {
                                                        let is_editing = editing.with(|e| e.as_deref() == Some(item.id.as_str()));
                                                        if manage && is_editing {
                                                            view! {
                                                                <OrderItemEditor
                                                                    order_id=order_key.clone()
                                                                    item=item
                                                                    detail=detail
                                                                    editing=editing
                                                                />
                                                            }
                                                            .into_any()
                                                        } else {
                                                            item_row(item).into_any()
                                                        }
                                                    })
                                                    .collect_view()}
                                            </tbody>
                                        </table>
                                    </div>
                                }
                                .into_any()
                            }
                        }}
                    </Show>
                </div>
                <div class="modal-backdrop" on:click=move |_| close()></div>
            </div>
        </Show>
    }
}
