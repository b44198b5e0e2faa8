use atelier::orders::{OrderDesk, edit_form_for};
use atelier::shared::protocol::OrderItemEdit;
use atelier::shared::{OrderDetail, OrderItem, RentalDate, VariantAxis};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::order_details::settle_refresh;
use crate::auth::use_auth;
use crate::components::icons::Close;
use crate::notify::use_notifier;

fn edit_value(edit: &OrderItemEdit, axis: VariantAxis) -> Option<&str> {
    match axis {
        VariantAxis::TopSize => edit.top_size.as_deref(),
        VariantAxis::BottomSize => edit.bottom_size.as_deref(),
        VariantAxis::Color => edit.color.as_deref(),
    }
}

fn edit_slot(edit: &mut OrderItemEdit, axis: VariantAxis) -> &mut Option<String> {
    match axis {
        VariantAxis::TopSize => &mut edit.top_size,
        VariantAxis::BottomSize => &mut edit.bottom_size,
        VariantAxis::Color => &mut edit.color,
    }
}

/// 订单项的行内编辑：尺码、颜色与租期
#[component]
pub fn OrderItemEditor(
    order_id: String,
    item: OrderItem,
    detail: RwSignal<Option<OrderDetail>>,
    /// 正在编辑的订单项 id，保存或取消后清空
    editing: RwSignal<Option<String>>,
) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let form = RwSignal::new(edit_form_for(&item));
    let (saving, set_saving) = signal(false);

    let name = item
        .selection
        .selection()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Unknown item".to_string());

    // 只有商品信息被 populate 时才知道可选的尺码与颜色
    let variant_selects = item
        .selection
        .selection()
        .map(|selection| {
            VariantAxis::ALL
                .into_iter()
                .filter(|axis| selection.offers(*axis))
                .map(|axis| {
                    let options = selection.options(axis).to_vec();
                    view! {
                        <select
                            class="select select-bordered select-xs w-full"
                            on:change=move |ev| {
                                let value = Some(event_target_value(&ev)).filter(|v| !v.is_empty());
                                form.update(|f| *edit_slot(f, axis) = value);
                            }
                        >
                            <option value="">{axis.label()}</option>
                            {options
                                .into_iter()
                                .map(|value| {
                                    let selected = form
                                        .with_untracked(|f| edit_value(f, axis) == Some(value.as_str()));
                                    view! { <option value=value.clone() selected=selected>{value.clone()}</option> }
                                })
                                .collect_view()}
                        </select>
                    }
                })
                .collect_view()
        });

    let date_input = move |pick: fn(&OrderItemEdit) -> Option<RentalDate>, store: fn(&mut OrderItemEdit, Option<RentalDate>)| {
        view! {
            <input
                type="date"
                class="input input-bordered input-xs w-full"
                prop:value=move || form.with(|f| pick(f).map(|d| d.to_input_value()).unwrap_or_default())
                on:change=move |ev| {
                    let value = RentalDate::parse(&event_target_value(&ev));
                    form.update(|f| store(f, value));
                }
            />
        }
    };

    let on_save = move |_| {
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        let order_id = order_id.clone();
        let item_id = item.id.clone();
        spawn_local(async move {
            let api = auth.api();
            let edit = form.get_untracked();
            match OrderDesk::new(&api).edit_item(&order_id, &item_id, &edit).await {
                Ok(applied) => {
                    notifier.success("Item updated successfully");
                    editing.set(None);
                    settle_refresh(applied, detail, notifier);
                }
                Err(e) => {
                    tracing::error!(error = %e, item = %item_id, "edit item failed");
                    notifier.error(e.user_message("Failed to update item"));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <tr class="bg-base-200">
            <td class="font-medium">{name}</td>
            <td>
                <div class="grid gap-1">{variant_selects}</div>
            </td>
            <td>
                <div class="grid gap-1">
                    {date_input(|f| f.deliver_date, |f, d| f.deliver_date = d)}
                    {date_input(|f| f.receive_date, |f, d| f.receive_date = d)}
                </div>
            </td>
            <td colspan="3"></td>
            <td>
                <div class="flex gap-1">
                    <button class="btn btn-primary btn-xs" disabled=move || saving.get() on:click=on_save>
                        "Save"
                    </button>
                    <button class="btn btn-ghost btn-xs" title="Cancel" on:click=move |_| editing.set(None)>
                        <Close attr:class="h-4 w-4" />
                    </button>
                </div>
            </td>
        </tr>
    }
}
