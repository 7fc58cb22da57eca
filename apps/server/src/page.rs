//! Server-side rendered portal page.

use axum::extract::State;
use axum::response::Html;
use cec_kernel::diagnostics::SelfCheck;
use cec_kernel::portal::{OverlayView, TileView};
use cec_kernel::prelude::{PortalState, PortalView};
use cec_kernel::server::PageRequest;
use chrono::Datelike;
use dioxus::prelude::*;

const STYLES: &str = r"
*{box-sizing:border-box}
body{margin:0;font-family:Inter,system-ui,Arial,sans-serif;background:#fafafa;color:#18181b}
a{color:inherit}
.wrap{max-width:80rem;margin:0 auto;padding:0 1.5rem}
header{position:sticky;top:0;z-index:30;border-bottom:1px solid #e4e4e7;background:rgba(255,255,255,.85);backdrop-filter:blur(6px)}
header .wrap{display:flex;align-items:center;justify-content:space-between;padding-top:1rem;padding-bottom:1rem}
.brand{display:flex;align-items:center;gap:.75rem}
.logo{width:2.25rem;height:2.25rem;border-radius:1rem;background:linear-gradient(135deg,#10b981,#0ea5e9)}
.brand h1{margin:0;font-size:1.1rem}
.brand p{margin:0;font-size:.75rem;color:#52525b}
nav a{margin-left:1.5rem;font-size:.875rem;text-decoration:none;color:#3f3f46}
.hero{display:grid;grid-template-columns:1fr 1fr;gap:2.5rem;align-items:center;padding:4rem 0}
.hero h2{font-size:2.1rem;margin:0}
.hero-figure{aspect-ratio:16/10;border:1px solid #e4e4e7;border-radius:1.5rem;background:#fff;overflow:hidden}
.hero-figure img{width:100%;height:100%;object-fit:contain}
.cta{display:flex;gap:.75rem;margin-top:1.5rem}
.btn{display:inline-flex;align-items:center;justify-content:center;gap:.5rem;border-radius:1rem;padding:.5rem 1rem;font-size:.875rem;font-weight:500;text-decoration:none;border:1px solid #d4d4d8}
.btn-primary{background:#18181b;color:#fff;border-color:#18181b;flex:1}
.btn-disabled{background:#d4d4d8;color:#fff;border-color:#d4d4d8;cursor:not-allowed;flex:1}
.btn-muted{color:#a1a1aa;border-color:#e4e4e7;cursor:not-allowed}
.tiles{display:grid;grid-template-columns:repeat(auto-fit,minmax(18rem,1fr));gap:1.5rem;padding-bottom:4rem}
.tile{display:flex;flex-direction:column;justify-content:space-between;border:1px solid #e4e4e7;border-radius:1.5rem;background:#fff;padding:1.25rem}
.tile-icon{width:3rem;height:3rem;border-radius:1rem;margin-bottom:1rem}
.accent-teal{background:linear-gradient(135deg,#10b981,#14b8a6,#0ea5e9)}
.accent-amber{background:linear-gradient(135deg,#f59e0b,#f97316,#ef4444)}
.accent-violet{background:linear-gradient(135deg,#6366f1,#8b5cf6,#9333ea)}
.tile h4{margin:0}
.tile p{font-size:.875rem;color:#3f3f46}
.tile-actions{display:flex;gap:.75rem;margin-top:1.25rem}
.tile-error{font-size:.75rem;color:#b91c1c;margin-top:.5rem}
.about{display:grid;grid-template-columns:repeat(3,1fr);gap:2rem;border:1px solid #e4e4e7;border-radius:1.5rem;background:#fff;padding:1.5rem;margin-bottom:4rem}
.about p{font-size:.875rem;color:#3f3f46}
.dev{border:1px solid #6ee7b7;background:#ecfdf5;border-radius:1.5rem;padding:1.5rem;margin-bottom:3rem;font-size:.875rem}
.dev ul{display:grid;grid-template-columns:repeat(auto-fit,minmax(16rem,1fr));gap:.5rem;list-style:none;padding:0}
.dev li{border:1px solid #a7f3d0;background:#fff;border-radius:.75rem;padding:.75rem}
.pass{color:#047857}.fail{color:#b91c1c}
.check-message{font-size:.75rem;color:#3f3f46;word-break:break-all}
.overlay{position:fixed;inset:0;z-index:50;display:grid;place-items:center;background:rgba(0,0,0,.4);padding:1rem}
.viewer{position:relative;display:flex;flex-direction:column;height:82vh;width:100%;max-width:72rem;overflow:hidden;border-radius:1.5rem;background:#fff}
.viewer-bar{display:flex;align-items:center;justify-content:space-between;gap:.75rem;border-bottom:1px solid #e4e4e7;padding:.75rem 3.5rem .75rem .75rem;font-size:.875rem}
.close{position:absolute;right:.75rem;top:.75rem;border:1px solid #d4d4d8;border-radius:9999px;background:#fff;padding:.25rem .6rem;text-decoration:none}
.loading{height:.25rem;background:#e4e4e7;overflow:hidden}
.loading-bar{height:100%;width:33%;background:linear-gradient(90deg,#10b981,#14b8a6,#0ea5e9);animation:loading 1.2s ease infinite}
.loading.done{display:none}
.viewer iframe{flex:1;width:100%;border:0}
footer{border-top:1px solid #e4e4e7;padding:2rem 0;font-size:.75rem;color:#52525b}
@keyframes loading{from{transform:translateX(-100%)}to{transform:translateX(300%)}}
@media (max-width:768px){.hero,.about{grid-template-columns:1fr}nav{display:none}}
";

/// Hides the loading bar once the embedded dashboard reports `load`.
const FRAME_SCRIPT: &str = r"
(function(){
  var frame=document.getElementById('cec-frame');
  var bar=document.getElementById('cec-loading');
  if(frame&&bar){frame.addEventListener('load',function(){bar.classList.add('done');});}
})();
";

pub(crate) async fn page_handler(
    State(state): State<PortalState>,
    request: PageRequest,
) -> Html<String> {
    let resolution = state.resolver.explain(&request.query);
    let view = PortalView::build(&resolution, &request.guard, &request.query, &state.config.hero);
    Html(render_page(view, chrono::Local::now().year()))
}

/// Renders a complete HTML document for `view`.
///
/// The component tree yields `head` and `body`; the document shell is written here.
#[must_use]
pub fn render_page(view: PortalView, year: i32) -> String {
    let mut dom = VirtualDom::new_with_props(PortalPage, PortalPageProps { view, year });
    dom.rebuild_in_place();
    format!("<!DOCTYPE html><html lang=\"en\">{}</html>", dioxus_ssr::render(&dom))
}

#[derive(Debug, Clone, PartialEq, Props)]
struct PortalPageProps {
    view: PortalView,
    year: i32,
}

#[allow(non_snake_case)]
fn PortalPage(props: PortalPageProps) -> Element {
    let PortalPageProps { view, year } = props;

    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1.0" }
            title { "Community Energy Compass" }
            style { dangerous_inner_html: STYLES }
        }
        body {
            Header {}
            main {
                Hero { image: view.hero_image }
                section { id: "tiles", class: "wrap",
                    h3 { "Choose a module" }
                    div { class: "tiles",
                        for tile in view.tiles {
                            TileCard { tile }
                        }
                    }
                }
                About {}
                if let Some(checks) = view.self_checks {
                    DevPanel { checks }
                }
            }
            if let Some(overlay) = view.overlay {
                Overlay { overlay }
            }
            footer {
                div { class: "wrap",
                    "© {year} Community Energy Compass. For research & educational use. Results are scenario-specific and depend on data and assumptions."
                }
            }
        }
    }
}

#[component]
fn Header() -> Element {
    rsx! {
        header {
            div { class: "wrap",
                div { class: "brand",
                    div { class: "logo", aria_hidden: "true" }
                    div {
                        h1 { "Community Energy Compass" }
                        p { "Decision support for equitable, resilient clean energy build-outs" }
                    }
                }
                nav {
                    a { href: "#tiles", "Apps" }
                    a { href: "#about", "About" }
                    a { href: "mailto:cec-team@communityenergycompass.org", "Support" }
                }
            }
        }
    }
}

#[component]
fn Hero(image: String) -> Element {
    rsx! {
        section { class: "wrap hero",
            div {
                h2 { "Explore energy-transition trade-offs: fast, transparent, stakeholder-ready" }
                p {
                    "Turn models into conversations: explore pathways, make trade-offs transparent, and co-create solutions that communities can support."
                }
                div { class: "cta",
                    a { class: "btn", href: "#tiles", "Get started" }
                    a {
                        class: "btn btn-primary",
                        href: "mailto:cec-team@communityenergycompass.org",
                        "Contact us"
                    }
                }
            }
            div { class: "hero-figure",
                img { src: image, alt: "CEC conceptual framework" }
            }
        }
    }
}

#[component]
fn TileCard(tile: TileView) -> Element {
    let icon = format!("tile-icon {}", tile.accent);
    let label = format!("Open {} in-page", tile.title);

    let open = match &tile.open_href {
        Some(href) => rsx! {
            a { class: "btn btn-primary", href: "{href}", aria_label: "{label}", title: "Open in-page",
                "Open in-page"
            }
        },
        None => rsx! {
            span { class: "btn btn-disabled", aria_disabled: "true", title: tile.invalid_reason.clone().unwrap_or_default(),
                "Open in-page"
            }
        },
    };

    let new_tab = match &tile.new_tab_href {
        Some(href) => rsx! {
            a { class: "btn", href: "{href}", target: "_blank", rel: "noreferrer", title: "Open in new tab",
                "New tab"
            }
        },
        None => rsx! {
            span { class: "btn btn-muted", aria_disabled: "true", title: tile.invalid_reason.clone().unwrap_or_default(),
                "New tab"
            }
        },
    };

    rsx! {
        article { class: "tile", id: "tile-{tile.key}",
            div {
                div { class: icon, aria_hidden: "true" }
                h4 { {tile.title} }
                p { {tile.summary} }
            }
            div {
                div { class: "tile-actions",
                    {open}
                    {new_tab}
                }
                if let Some(reason) = tile.invalid_reason {
                    p { class: "tile-error", {reason} }
                }
            }
        }
    }
}

#[component]
fn About() -> Element {
    rsx! {
        section { id: "about", class: "wrap",
            div { class: "about",
                div {
                    h3 { "What is CEC?" }
                    p {
                        "Community Energy Compass (CEC) is a transparent decision-support platform that connects capacity expansion modeling (e.g., GenX), Modelling to Generate Alternatives (MGA/MGCA), and geospatial siting data (CPAs) to surface credible options and the trade-offs behind them."
                    }
                }
                div {
                    h3 { "Methodological footing" }
                    p {
                        "Portfolios reflect near-optimal search (MGA/MGCA), best-practice storage/LDES modeling, and explicit siting constraints. Use CEC to discuss feasibility, not just least-cost optima."
                    }
                }
                div {
                    h3 { "Downscaling" }
                    p {
                        "We downscale national/state capacity plans to geographies using constraints, resource quality, and infrastructure proximity to produce siting-feasible buildouts and pixel-level impacts."
                    }
                }
            }
        }
    }
}

#[component]
fn DevPanel(checks: Vec<SelfCheck>) -> Element {
    rsx! {
        section { class: "wrap",
            div { class: "dev", id: "dev-panel",
                h3 { "Dev: Config Tester" }
                ul {
                    for check in checks {
                        li {
                            div { {check.name} }
                            if check.pass {
                                div { class: "pass", "PASS" }
                            } else {
                                div { class: "fail", "FAIL" }
                            }
                            div { class: "check-message", {check.message} }
                        }
                    }
                }
                p {
                    "Tip: override config via query params, e.g.: "
                    code { "?explore=/explore&tradeoffs=/tradeoffs" }
                }
            }
        }
    }
}

#[component]
fn Overlay(overlay: OverlayView) -> Element {
    rsx! {
        div { class: "overlay",
            div { class: "viewer", role: "dialog", aria_modal: "true", aria_label: "{overlay.title} viewer",
                a { class: "close", href: "{overlay.close_href}", aria_label: "Close", "✕" }
                div { class: "viewer-bar",
                    span { {overlay.title} }
                    a { class: "btn", href: "{overlay.new_tab_href}", target: "_blank", rel: "noreferrer",
                        "Open in new tab"
                    }
                }
                div { class: "loading", id: "cec-loading",
                    div { class: "loading-bar" }
                }
                iframe { id: "cec-frame", title: "{overlay.title}", src: "{overlay.frame_src}" }
                script { dangerous_inner_html: FRAME_SCRIPT }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cec_kernel::domain::config::HeroConfig;
    use cec_kernel::prelude::{ConfigResolver, ModuleKey, PartialEndpoints, QueryParams, UrlGuard};

    fn page(resolver: &ConfigResolver, query: &str) -> String {
        let query = QueryParams::parse(Some(query));
        let view = PortalView::build(
            &resolver.explain(&query),
            &UrlGuard::new(Some("https://cec.example.org")),
            &query,
            &HeroConfig::default(),
        );
        render_page(view, 2026)
    }

    #[test]
    fn renders_document_shell() {
        let html = page(&ConfigResolver::default(), "");
        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\"><head>"), "{html}");
        assert!(html.contains("<title>Community Energy Compass</title>"));
        assert!(html.contains("</head><body>"));
        assert!(html.ends_with("</body></html>"));
        assert_eq!(html.matches("<html").count(), 1);
    }

    #[test]
    fn renders_tiles_and_footer() {
        let html = page(&ConfigResolver::default(), "");
        assert!(html.contains("Explore Solutions"));
        assert!(html.contains("Explore Tradeoffs"));
        assert!(html.contains("Preference Blender"));
        assert!(html.contains("href=\"?open=explore\""));
        assert!(html.contains("© 2026 Community Energy Compass"));
        assert!(!html.contains("cec-frame"));
        assert!(!html.contains("dev-panel"));
    }

    #[test]
    fn renders_overlay_with_embedded_frame() {
        let html = page(&ConfigResolver::default(), "open=blender");
        assert!(html.contains("src=\"/blender?embedded=true\""));
        assert!(html.contains("Preference Blender viewer"));
        assert!(html.contains("cec-loading"));
    }

    #[test]
    fn renders_invalid_url_message() {
        let resolver = ConfigResolver::from_layers(
            PartialEndpoints::default(),
            PartialEndpoints::default().with(ModuleKey::Tradeoffs, "ftp://x"),
        );
        let html = page(&resolver, "");
        assert!(html.contains("Invalid URL for Explore Tradeoffs: ftp://x"));
        assert!(!html.contains("href=\"?open=tradeoffs\""));
    }

    #[test]
    fn escapes_query_supplied_values() {
        let html = page(
            &ConfigResolver::default(),
            "hero=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E&explore=%3Cb%3Ex%3C%2Fb%3E&open=explore",
        );
        assert!(!html.contains("<script>alert"), "{html}");
        assert!(!html.contains("<b>"), "{html}");
        // The frame loader is the only script on the page.
        assert_eq!(html.matches("<script").count(), 1);
    }

    #[test]
    fn renders_dev_panel() {
        let html = page(&ConfigResolver::default(), "dev=1");
        assert!(html.contains("Dev: Config Tester"));
        assert!(html.contains("explore appends embedded=true"));
        assert!(html.contains("PASS"));
    }
}
