use url::Url;

/// Drop the query component in place. Scheme, host, path and fragment are untouched.
pub fn strip_query(url: &mut Url) {
    url.set_query(None);
}

pub fn normalize(mut url: Url) -> Url {
    strip_query(&mut url);
    url
}

pub fn normalize_all(urls: &mut [Url]) {
    urls.iter_mut().for_each(strip_query);
}
