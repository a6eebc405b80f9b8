use dioxus::prelude::*;

use super::Page;

pub async fn index() -> Page<'static> {
    Page {
        title: rsx! { "Home" },
        content: rsx! {
            section {
                h1 { "Redirect Demo" }
                p {
                    "This application is intentionally vulnerable. "
                    "The redirect route checks an allow-list and then ignores it, "
                    "so any destination is accepted."
                }
            }
            menu {
                li {
                    a { href: "/redirect?url=/home",
                        "redirect to /home (allowed)"
                    }
                }
                li {
                    a { href: "/redirect?url=/about",
                        "redirect to /about (allowed)"
                    }
                }
                li {
                    a { href: "/redirect?url=https://example.org/",
                        "redirect off-site (not allowed, followed anyway)"
                    }
                }
            }
        },
    }
}

pub async fn home() -> Page<'static> {
    Page {
        title: rsx! { "Welcome" },
        content: rsx! {
            h1 { "Welcome home" }
            p { "You arrived here through an allow-listed redirect." }
            nav {
                a { href: "/", "back to the demo" }
            }
        },
    }
}

pub async fn about() -> Page<'static> {
    Page {
        title: rsx! { "About" },
        content: rsx! {
            h1 { "About" }
            p {
                "A training target for open redirect vulnerabilities. "
                "Do not deploy it anywhere that matters."
            }
            nav {
                a { href: "/", "back to the demo" }
            }
        },
    }
}
