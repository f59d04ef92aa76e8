use maud::{html, Markup, DOCTYPE};

use crate::models::{Release, SharedAlbum, UserSample};

use super::CompareView;

const STYLE: &str = r#"
body { font-family: sans-serif; background: #f9fafb; margin: 0; padding: 1rem; }
main { display: flex; flex-direction: column; align-items: center; }
form { display: flex; flex-direction: column; gap: 1rem; width: 100%; max-width: 28rem; background: #fff; padding: 1.5rem; border-radius: 4px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
input { border: 1px solid #ccc; padding: .5rem; border-radius: 4px; }
button { background: #2563eb; color: #fff; border: 0; border-radius: 4px; padding: .5rem; font-weight: 600; }
.error { color: #dc2626; font-size: .875rem; }
.grid { display: grid; gap: 2rem; width: 100%; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); }
.album { background: #fff; border-radius: 4px; padding: 1rem; max-width: 160px; margin: 0 auto; }
.album img { width: 8rem; height: 8rem; object-fit: cover; border-radius: 4px; }
.versions { font-size: .75rem; }
.empty { color: #6b7280; text-align: center; }
.debug { background: #fef9c3; border: 1px solid #facc15; color: #854d0e; padding: 1rem; margin-top: 1rem; border-radius: 4px; width: 100%; }
"#;

/// Full compare page
pub fn compare_page(view: &CompareView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Discogs Collection Overlap" }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                main {
                    h1 { "Discogs Collection Overlap" }
                    (compare_form(view))
                    (results(view))
                    @if let Some(debug) = &view.debug {
                        div class="debug" {
                            div { strong { "Debug Info" } }
                            (debug_line("User 1", &debug.user1))
                            (debug_line("User 2", &debug.user2))
                        }
                    }
                }
            }
        }
    }
}

fn compare_form(view: &CompareView) -> Markup {
    html! {
        form method="get" action="/compare" {
            input type="text" name="username1" placeholder="First Discogs username" value=(view.username1);
            input type="text" name="username2" placeholder="Second Discogs username" value=(view.username2);
            button type="submit" disabled[view.loading] {
                @if view.loading { "Comparing..." } @else { "Find Overlap" }
            }
            @if let Some(error) = &view.error {
                div class="error" { (error) }
            }
        }
    }
}

fn results(view: &CompareView) -> Markup {
    html! {
        @if !view.overlap.is_empty() {
            section {
                h2 { "Shared Albums" }
                div class="grid" {
                    @for album in &view.overlap {
                        (album_card(album))
                    }
                }
            }
        } @else if view.completed {
            div class="empty" { "No shared albums found." }
        }
    }
}

fn album_card(album: &SharedAlbum) -> Markup {
    let display = &album.display;
    html! {
        div class="album" id=(album.key.0) {
            @if let Some(cover) = display.cover_image() {
                img src=(cover) alt=(display.title());
            }
            div { strong { (display.title()) } }
            div { (display.artists_display()) }
            div class="versions" {
                div { strong { "User 1's versions:" } }
                (version_list(&album.user1))
                div { strong { "User 2's versions:" } }
                (version_list(&album.user2))
            }
        }
    }
}

fn version_list(releases: &[Release]) -> Markup {
    html! {
        ul {
            @for release in releases {
                li {
                    (release.title()) " (" (release.year()) ")"
                    @if let Some(master_url) = release.master_url() {
                        " "
                        a href=(master_url) target="_blank" rel="noopener noreferrer" { "master" }
                    }
                    " "
                    a href=(release.release_url()) target="_blank" rel="noopener noreferrer" { "release" }
                }
            }
        }
    }
}

fn debug_line(label: &str, sample: &UserSample) -> Markup {
    html! {
        div { (label) ": " (sample.count) " releases. Sample: " (sample.titles.join(", ")) }
    }
}
