//! Browser implementations of the leaderboard's async sources

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Request, RequestInit, RequestMode, Response};

use super::ranking::decode_records;
use super::{AvatarLoader, FriendRecord, FriendSource, LeaderboardError, PanelReply};
use crate::renderer::ImageStore;

/// Fetches friend records as a JSON array from a URL
pub struct HttpFriendSource {
    url: Option<String>,
}

impl HttpFriendSource {
    /// `None` means the host has no friend storage configured
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

impl FriendSource for HttpFriendSource {
    fn fetch(&mut self, keys: &[&str], reply: PanelReply) -> Result<(), LeaderboardError> {
        let Some(base) = self.url.clone() else {
            return Err(LeaderboardError::Unavailable);
        };
        let url = format!("{}?keys={}", base, keys.join(","));
        wasm_bindgen_futures::spawn_local(async move {
            reply.friends(fetch_records(&url).await);
        });
        Ok(())
    }
}

async fn fetch_records(url: &str) -> Result<Vec<FriendRecord>, LeaderboardError> {
    let window = web_sys::window().ok_or(LeaderboardError::Unavailable)?;
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| LeaderboardError::Fetch(format!("{:?}", e)))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| LeaderboardError::Fetch(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| LeaderboardError::Fetch("not a Response".to_string()))?;
    if !response.ok() {
        return Err(LeaderboardError::Fetch(format!("HTTP {}", response.status())));
    }

    let text = JsFuture::from(
        response
            .text()
            .map_err(|e| LeaderboardError::Fetch(format!("{:?}", e)))?,
    )
    .await
    .map_err(|e| LeaderboardError::Fetch(format!("{:?}", e)))?
    .as_string()
    .unwrap_or_default();

    decode_records(&text).map_err(|e| LeaderboardError::Decode(e.to_string()))
}

/// Loads avatars with `<img>` elements into the shared image store
pub struct ImageAvatarLoader {
    images: ImageStore,
}

impl ImageAvatarLoader {
    pub fn new(images: ImageStore) -> Self {
        Self { images }
    }
}

impl AvatarLoader for ImageAvatarLoader {
    fn load(&mut self, url: &str, reply: PanelReply) {
        let Ok(image) = HtmlImageElement::new() else {
            reply.avatar(url, false);
            return;
        };
        image.set_cross_origin(Some("anonymous"));

        let onload = {
            let images = self.images.clone();
            let image = image.clone();
            let reply = reply.clone();
            let url = url.to_string();
            Closure::once(move || {
                images.borrow_mut().insert(url.clone(), image);
                reply.avatar(&url, true);
            })
        };
        let onerror = {
            let reply = reply.clone();
            let url = url.to_string();
            Closure::once(move || reply.avatar(&url, false))
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        image.set_src(url);
    }
}
