//! Built-in search engine descriptors

use url::form_urlencoded;

/// A search engine the address bar can query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine {
    /// Bundled icon asset
    pub icon_path: &'static str,
    /// Query URL; the encoded search term is appended
    pub query_url: &'static str,
    pub title: &'static str,
}

impl SearchEngine {
    const fn new(icon_path: &'static str, query_url: &'static str, title: &'static str) -> Self {
        Self {
            icon_path,
            query_url,
            title,
        }
    }

    /// Full search URL for `term`
    pub fn query_for(&self, term: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(term.trim().as_bytes()).collect();
        format!("{}{}", self.query_url, encoded)
    }

    /// Look up a built-in engine by title, ignoring case
    pub fn by_title(title: &str) -> Option<&'static SearchEngine> {
        ALL.iter().find(|e| e.title.eq_ignore_ascii_case(title))
    }
}

pub const GOOGLE: SearchEngine = SearchEngine::new(
    "file:///android_asset/google.png",
    "https://www.google.com/search?client=lightning&ie=UTF-8&oe=UTF-8&q=",
    "Google",
);
pub const BING: SearchEngine = SearchEngine::new(
    "file:///android_asset/bing.png",
    "https://www.bing.com/search?q=",
    "Bing",
);
pub const DUCK: SearchEngine = SearchEngine::new(
    "file:///android_asset/duckduckgo.png",
    "https://duckduckgo.com/?t=lightning&q=",
    "DuckDuckGo",
);
pub const DUCK_LITE: SearchEngine = SearchEngine::new(
    "file:///android_asset/duckduckgo.png",
    "https://duckduckgo.com/lite/?t=lightning&q=",
    "DuckDuckGo Lite",
);
pub const YAHOO: SearchEngine = SearchEngine::new(
    "file:///android_asset/yahoo.png",
    "https://search.yahoo.com/search?p=",
    "Yahoo",
);
pub const STARTPAGE: SearchEngine = SearchEngine::new(
    "file:///android_asset/startpage.png",
    "https://startpage.com/do/search?language=english&query=",
    "StartPage",
);
pub const STARTPAGE_MOBILE: SearchEngine = SearchEngine::new(
    "file:///android_asset/startpage.png",
    "https://startpage.com/do/m/mobilesearch?language=english&query=",
    "StartPage (Mobile)",
);
pub const ASK: SearchEngine = SearchEngine::new(
    "file:///android_asset/ask.png",
    "http://www.ask.com/web?qsrc=0&o=0&l=dir&qo=LightningBrowser&q=",
    "Ask",
);
pub const BAIDU: SearchEngine = SearchEngine::new(
    "file:///android_asset/baidu.png",
    "https://www.baidu.com/s?wd=",
    "Baidu",
);
pub const YANDEX: SearchEngine = SearchEngine::new(
    "file:///android_asset/yandex.png",
    "https://yandex.ru/yandsearch?lr=21411&text=",
    "Yandex",
);
pub const NAVER: SearchEngine = SearchEngine::new(
    "file:///android_asset/naver.png",
    "https://search.naver.com/search.naver?ie=utf8&query=",
    "Naver",
);

/// Every built-in engine, in menu order
pub const ALL: [SearchEngine; 11] = [
    GOOGLE,
    BING,
    DUCK,
    DUCK_LITE,
    YAHOO,
    STARTPAGE,
    STARTPAGE_MOBILE,
    ASK,
    BAIDU,
    YANDEX,
    NAVER,
];
