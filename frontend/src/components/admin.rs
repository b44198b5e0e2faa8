//! 后台管理
//!
//! 四个标签页：预订、商品、分类、横幅。各标签页直接调用 API，不经过购物车。

mod add_booking;
mod banners;
mod bookings;
mod categories;
pub mod order_details;
mod order_editor;
mod selection_form;
mod selections;

use atelier::ClientError;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use self::banners::AdminBanners;
use self::bookings::AdminBookings;
use self::categories::AdminCategories;
use self::selections::AdminSelections;
use crate::auth::AuthContext;
use crate::web::read_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Bookings,
    Selections,
    Categories,
    Banners,
}

impl AdminTab {
    const ALL: [AdminTab; 4] = [Self::Bookings, Self::Selections, Self::Categories, Self::Banners];

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Bookings => "Bookings",
            AdminTab::Selections => "Selections",
            AdminTab::Categories => "Categories",
            AdminTab::Banners => "Banners",
        }
    }
}

/// 文件输入框中选中的第一个文件
fn picked_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    ev.target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?
        .files()?
        .get(0)
}

/// 读取选中的文件并上传，返回服务端给出的图片地址
async fn upload_image(auth: AuthContext, file: web_sys::File) -> Result<String, ClientError> {
    let payload = read_file(file).await?;
    tracing::debug!(name = %payload.file_name, size = payload.bytes.len(), "uploading image");
    auth.api().upload(payload).await
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let (active, set_active) = signal(AdminTab::Bookings);

    view! {
        <div class="max-w-7xl mx-auto px-4 md:px-8 py-10">
            <h1 class="text-3xl font-serif mb-6">"Admin Portal"</h1>

            <div class="flex flex-col md:flex-row gap-6">
                <ul class="menu bg-base-200 rounded-box md:w-56 h-fit">
                    {AdminTab::ALL
                        .into_iter()
                        .map(|tab| view! {
                            <li>
                                <a
                                    class=move || if active.get() == tab { "active" } else { "" }
                                    on:click=move |_| set_active.set(tab)
                                >
                                    {tab.label()}
                                </a>
                            </li>
                        })
                        .collect_view()}
                </ul>

                <div class="flex-1 min-w-0">
                    {move || match active.get() {
                        AdminTab::Bookings => view! { <AdminBookings /> }.into_any(),
                        AdminTab::Selections => view! { <AdminSelections /> }.into_any(),
                        AdminTab::Categories => view! { <AdminCategories /> }.into_any(),
                        AdminTab::Banners => view! { <AdminBanners /> }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
