use atelier::catalog::{self, CAROUSEL_INTERVAL_MS};
use atelier::navigation;
use atelier::shared::{Banner, Category};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::{ChevronLeft, ChevronRight};
use crate::web::Interval;
use crate::web::route::AppRoute;
use crate::web::router::Link;

const HERO_FALLBACK: &str =
    "https://images.unsplash.com/photo-1490481651871-ab68de25d43d?q=80&w=2070&auto=format&fit=crop";
const DEFAULT_HEADLINE: &str = "New Collection";

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let media = auth.media();

    let (banners, set_banners) = signal(Vec::<Banner>::new());
    let (featured, set_featured) = signal(Vec::<Category>::new());
    let (slide, set_slide) = signal(0usize);

    // 首页数据：两个请求互不影响，失败时保持空列表
    spawn_local(async move {
        let api = auth.api();
        match api.banners().await {
            Ok(list) => set_banners.set(catalog::active_banners(&list)),
            Err(e) => tracing::error!(error = %e, "failed to load banners"),
        }
        match api.categories().await {
            Ok(list) => set_featured.set(catalog::featured_categories(&list)),
            Err(e) => tracing::error!(error = %e, "failed to load categories"),
        }
    });

    // 轮播定时器随组件一起释放
    let ticker = Interval::new(CAROUSEL_INTERVAL_MS as u32, move || {
        let len = banners.with_untracked(Vec::len);
        set_slide.try_update(|i| *i = catalog::next_slide(*i, len));
    });
    let _ticker = StoredValue::new_local(ticker);

    let step = move |forward: bool| {
        let len = banners.with_untracked(Vec::len);
        set_slide.update(|i| {
            *i = if forward {
                catalog::next_slide(*i, len)
            } else if len == 0 {
                0
            } else {
                (*i + len - 1) % len
            }
        });
    };

    let hero = {
        let media = media.clone();
        move || {
            let index = slide.get();
            banners.with(|list| match list.get(index).or_else(|| list.first()) {
                Some(banner) => (
                    media.secure_url(&banner.image),
                    banner.title.clone().unwrap_or_else(|| DEFAULT_HEADLINE.to_string()),
                ),
                None => (HERO_FALLBACK.to_string(), DEFAULT_HEADLINE.to_string()),
            })
        }
    };
    let hero_image = {
        let hero = hero.clone();
        move || hero().0
    };
    let hero_title = move || hero().1;

    view! {
        <section class="relative h-[70vh] min-h-[420px] overflow-hidden">
            <img src=hero_image alt="Hero" class="absolute inset-0 w-full h-full object-cover" />
            <div class="absolute inset-0 bg-gradient-to-r from-black/60 to-transparent"></div>
            <div class="relative z-10 h-full flex flex-col justify-center px-8 md:px-16 max-w-2xl text-white">
                <h1 class="text-4xl md:text-6xl font-serif mb-4">{hero_title}</h1>
                <p class="text-lg opacity-90 mb-8">
                    "Timeless elegance for your special occasions. Explore our curated selection of premium attire."
                </p>
                <Link to=navigation::CATALOG_PATH class="btn btn-primary w-fit">"Shop Now"</Link>
            </div>
            <Show when=move || banners.with(|b| b.len() > 1)>
                <button class="btn btn-circle btn-ghost text-white absolute left-4 top-1/2 z-10" on:click=move |_| step(false)>
                    <ChevronLeft attr:class="h-6 w-6" />
                </button>
                <button class="btn btn-circle btn-ghost text-white absolute right-4 top-1/2 z-10" on:click=move |_| step(true)>
                    <ChevronRight attr:class="h-6 w-6" />
                </button>
            </Show>
        </section>

        <section class="max-w-7xl mx-auto px-4 md:px-8 py-12">
            <div class="flex items-end justify-between mb-6">
                <h2 class="text-3xl font-serif">"Shop by Category"</h2>
                <Link to=navigation::CATALOG_PATH class="link link-hover text-sm">"View All"</Link>
            </div>
            <Show
                when=move || featured.with(|c| !c.is_empty())
                fallback=|| view! {
                    <div class="text-center py-12 text-base-content/60">
                        <p>"New collections arriving soon."</p>
                    </div>
                }
            >
                <div class="grid grid-cols-2 md:grid-cols-4 gap-6">
                    <For
                        each=move || featured.get()
                        key=|c| c.id.clone()
                        children={
                            let media = media.clone();
                            move |category| {
                                let href = AppRoute::Selections { category: Some(category.name.clone()) }.to_path();
                                let image = category
                                    .image
                                    .as_deref()
                                    .map(|url| media.secure_url(url))
                                    .filter(|url| !url.is_empty())
                                    .unwrap_or_else(|| HERO_FALLBACK.to_string());
                                view! {
                                    <Link to=href class="card bg-base-100 shadow hover:shadow-xl transition-shadow">
                                        <figure class="aspect-[4/5]">
                                            <img src=image alt=category.name.clone() class="w-full h-full object-cover" />
                                        </figure>
                                        <div class="card-body p-4">
                                            <h3 class="card-title text-base">{category.name.clone()}</h3>
                                            <span class="text-sm text-primary">"Shop Now"</span>
                                        </div>
                                    </Link>
                                }
                            }
                        }
                    />
                </div>
            </Show>
        </section>

        <section class="bg-base-200">
            <div class="max-w-7xl mx-auto px-4 md:px-8 py-12 grid md:grid-cols-3 gap-8 text-center">
                <div>
                    <h4 class="font-semibold mb-1">"Premium Quality"</h4>
                    <p class="text-sm opacity-70">"Hand-picked fabrics and designs."</p>
                </div>
                <div>
                    <h4 class="font-semibold mb-1">"Perfect Fit"</h4>
                    <p class="text-sm opacity-70">"Expert tailoring for every size."</p>
                </div>
                <div>
                    <h4 class="font-semibold mb-1">"Easy Booking"</h4>
                    <p class="text-sm opacity-70">"Seamless online reservation."</p>
                </div>
            </div>
        </section>
    }
}
