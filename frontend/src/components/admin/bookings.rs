use atelier::orders::OrderDesk;
use atelier::pricing::format_inr;
use atelier::shared::{Order, RentalDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::add_booking::AddBookingDialog;
use super::order_details::OrderDetailsModal;
use crate::auth::use_auth;
use crate::components::icons::{Eye, Plus, RefreshCw};
use crate::notify::use_notifier;

fn customer(order: &Order) -> (String, String) {
    let user = order.user.as_ref();
    (
        user.and_then(|u| u.name())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
            .to_string(),
        user.and_then(|u| u.email()).unwrap_or_default().to_string(),
    )
}

/// 全部订单（每行一个订单，明细在弹窗中维护）
#[component]
pub fn AdminBookings() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let orders = RwSignal::new(Vec::<Order>::new());
    let loading = RwSignal::new(true);
    let viewing = RwSignal::new(Option::<String>::None);
    let adding = RwSignal::new(false);

    let reload = move || {
        loading.set(true);
        spawn_local(async move {
            let api = auth.api();
            match OrderDesk::new(&api).all_orders().await {
                Ok(list) => orders.set(list),
                Err(e) => {
                    tracing::error!(error = %e, "failed to load orders");
                    notifier.error("Failed to load orders");
                }
            }
            loading.set(false);
        });
    };
    reload();

    // 弹窗关闭后刷新列表，明细里的修改可能影响合计
    Effect::new(move |was_open: Option<bool>| {
        let open = viewing.with(Option::is_some);
        if was_open == Some(true) && !open {
            reload();
        }
        open
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-serif">"All Bookings"</h2>
                <div class="flex gap-2">
                    <button class="btn btn-ghost btn-sm" title="Refresh" on:click=move |_| reload()>
                        <RefreshCw attr:class="h-4 w-4" />
                    </button>
                    <button class="btn btn-primary btn-sm gap-2" on:click=move |_| adding.set(true)>
                        <Plus attr:class="h-4 w-4" />
                        "Add Booking"
                    </button>
                </div>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner"></span></div> }
            >
                <div class="overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Order ID"</th>
                                <th>"User"</th>
                                <th>"Items"</th>
                                <th>"Total Amount"</th>
                                <th>"Date"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || orders.get()
                                key=|o| (o.id.clone(), o.items_count, o.total_amount.to_bits())
                                children=move |order| {
                                    let (name, email) = customer(&order);
                                    let placed = order
                                        .created_at
                                        .as_deref()
                                        .and_then(RentalDate::parse)
                                        .map(|d| d.display_long())
                                        .unwrap_or_default();
                                    let id = order.id.clone();
                                    view! {
                                        <tr>
                                            <td class="font-mono opacity-70">"#" {order.short_code()}</td>
                                            <td>
                                                <div class="font-medium">{name}</div>
                                                <div class="text-xs opacity-60">{email}</div>
                                            </td>
                                            <td><span class="badge badge-ghost">{format!("{} Items", order.items_count)}</span></td>
                                            <td class="font-semibold">{format_inr(order.total_amount)}</td>
                                            <td class="text-sm opacity-70">{placed}</td>
                                            <td>
                                                <button class="btn btn-outline btn-sm gap-2" on:click=move |_| viewing.set(Some(id.clone()))>
                                                    <Eye attr:class="h-4 w-4" />
                                                    "View Details"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || orders.with(Vec::is_empty)>
                        <p class="text-center py-8 opacity-60">"No orders found."</p>
                    </Show>
                </div>
            </Show>

            <AddBookingDialog open=adding on_added=move |_| reload() />
            <OrderDetailsModal order_id=viewing manage=true />
        </div>
    }
}
