//! Static file serving for local development of the web app.
//!
//! Every response, errors and redirects included, carries the CORS and
//! camera permission headers the app needs when opened from a phone.

use crate::domain::constants::{
    CAMERA_PERMISSIONS_POLICY, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN,
};
use anyhow::Context;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use warp::http::header::HeaderValue;
use warp::http::{HeaderMap, Method, StatusCode, Uri};
use warp::path::FullPath;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

const HREF_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn response_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static(CAMERA_PERMISSIONS_POLICY),
    );
    headers
}

pub fn routes(root: PathBuf) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let shared_root = Arc::new(root.clone());

    let methods = warp::method().and_then(method_guard);
    let listing = warp::path::full()
        .and(with_root(shared_root))
        .and_then(directory_listing);
    let files = warp::fs::dir(root);

    methods
        .or(listing)
        .or(files)
        .recover(handle_rejection)
        .with(warp::reply::with::headers(response_headers()))
        .with(warp::log::custom(access_log))
}

/// Binds `addr` and returns the bound address with the server future.
pub fn bind(
    addr: SocketAddr,
    root: PathBuf,
) -> anyhow::Result<(SocketAddr, impl Future<Output = ()>)> {
    warp::serve(routes(root))
        .try_bind_ephemeral(addr)
        .with_context(|| format!("failed to bind {}", addr))
}

fn with_root(
    root: Arc<PathBuf>,
) -> impl Filter<Extract = (Arc<PathBuf>,), Error = Infallible> + Clone {
    warp::any().map(move || root.clone())
}

/// GET and HEAD fall through to the file filters; everything else is
/// answered here.
async fn method_guard(method: Method) -> Result<Response, Rejection> {
    if method == Method::GET || method == Method::HEAD {
        return Err(warp::reject::not_found());
    }
    if method == Method::OPTIONS {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(error_page(StatusCode::NOT_IMPLEMENTED, "Unsupported method"))
}

/// Maps a request path onto `root`, refusing anything that climbs out of it.
pub fn resolve_request_path(root: &Path, raw: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    let mut path = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains('\\') || s.contains(':') => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

async fn directory_listing(full: FullPath, root: Arc<PathBuf>) -> Result<Response, Rejection> {
    let dir = resolve_request_path(&root, full.as_str()).ok_or_else(warp::reject::not_found)?;
    let is_dir = tokio::fs::metadata(&dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(warp::reject::not_found());
    }

    if !full.as_str().ends_with('/') {
        let location: Uri = format!("{}/", full.as_str())
            .parse()
            .map_err(|_| warp::reject::not_found())?;
        return Ok(warp::redirect(location).into_response());
    }

    // Let the file filter resolve index.html.
    if tokio::fs::metadata(dir.join("index.html")).await.is_ok() {
        return Err(warp::reject::not_found());
    }

    let names = read_listing(&dir).await.map_err(|e| {
        tracing::warn!(dir = %dir.display(), error = %e, "cannot list directory");
        warp::reject::not_found()
    })?;
    let display = percent_decode_str(full.as_str()).decode_utf8_lossy();
    Ok(warp::reply::html(render_listing(&display, &names)).into_response())
}

async fn read_listing(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().to_string();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort_by_key(|n| n.to_lowercase());
    Ok(names)
}

/// HTML index of `names` (directories carry a trailing `/`).
pub fn render_listing(display_path: &str, names: &[String]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n</head>\n<body>\n", title));
    html.push_str(&format!("<h1>{}</h1>\n<hr>\n<ul>\n", title));
    for name in names {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            utf8_percent_encode(name, HREF_ESCAPES),
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Error response</title>\n</head>\n<body>\n<h1>Error response</h1>\n\
         <p>Error code: {}</p>\n<p>Message: {}.</p>\n</body>\n</html>\n",
        status.as_u16(),
        message
    );
    warp::reply::with_status(warp::reply::html(body), status).into_response()
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "File not found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::NOT_IMPLEMENTED, "Unsupported method")
    } else {
        tracing::warn!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };
    Ok(error_page(status, message))
}

fn access_log(info: warp::log::Info<'_>) {
    tracing::info!(
        target: "qwirkle_tools::access",
        method = %info.method(),
        path = info.path(),
        status = info.status().as_u16(),
        elapsed_ms = info.elapsed().as_millis() as u64,
        remote = ?info.remote_addr(),
        "request"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let tmp = TempDir::new().expect("temp dir");
        let root = tmp.path();
        fs::create_dir_all(root.join("models/pretrained/color-model")).expect("create");
        fs::create_dir_all(root.join("app")).expect("create");
        fs::write(root.join("app/index.html"), "<h1>Qwirkle Counter</h1>").expect("write");
        fs::write(
            root.join("models/pretrained/color-model/model.json"),
            "{\"format\":\"layers-model\"}",
        )
        .expect("write");
        fs::write(root.join("notes & ideas.txt"), "scoring").expect("write");
        tmp
    }

    fn assert_dev_headers(headers: &HeaderMap) {
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            headers["access-control-allow-methods"],
            "GET, POST, OPTIONS"
        );
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["permissions-policy"], "camera=(self)");
    }

    #[tokio::test]
    async fn serves_files_with_dev_headers() {
        let tmp = site();
        let filter = routes(tmp.path().to_path_buf());
        let res = warp::test::request()
            .path("/models/pretrained/color-model/model.json")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), 200);
        assert_eq!(res.body().as_ref(), b"{\"format\":\"layers-model\"}");
        assert_dev_headers(res.headers());
    }

    #[tokio::test]
    async fn missing_file_is_404_with_dev_headers() {
        let tmp = site();
        let filter = routes(tmp.path().to_path_buf());
        let res = warp::test::request()
            .path("/models/pretrained/shape-model/model.json")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), 404);
        assert_dev_headers(res.headers());
    }

    #[tokio::test]
    async fn options_and_post_are_answered_with_dev_headers() {
        let tmp = site();
        let filter = routes(tmp.path().to_path_buf());

        let preflight = warp::test::request()
            .method("OPTIONS")
            .path("/anything")
            .reply(&filter)
            .await;
        assert_eq!(preflight.status(), 204);
        assert_dev_headers(preflight.headers());

        let post = warp::test::request()
            .method("POST")
            .path("/app/index.html")
            .body("{}")
            .reply(&filter)
            .await;
        assert_eq!(post.status(), 501);
        assert_dev_headers(post.headers());
    }

    #[tokio::test]
    async fn directory_without_slash_redirects() {
        let tmp = site();
        let filter = routes(tmp.path().to_path_buf());
        let res = warp::test::request().path("/app").reply(&filter).await;
        assert_eq!(res.status(), 301);
        assert_eq!(res.headers()["location"], "/app/");
        assert_dev_headers(res.headers());
    }

    #[tokio::test]
    async fn directory_with_index_serves_index() {
        let tmp = site();
        let filter = routes(tmp.path().to_path_buf());
        let res = warp::test::request().path("/app/").reply(&filter).await;
        assert_eq!(res.status(), 200);
        assert_eq!(res.body().as_ref(), b"<h1>Qwirkle Counter</h1>");
    }

    #[tokio::test]
    async fn directory_without_index_is_listed() {
        let tmp = site();
        let filter = routes(tmp.path().to_path_buf());
        let res = warp::test::request().path("/").reply(&filter).await;
        assert_eq!(res.status(), 200);
        let body = String::from_utf8(res.body().to_vec()).expect("utf8");
        assert!(body.contains("Directory listing for /"));
        assert!(body.contains("<a href=\"app/\">app/</a>"));
        assert!(body.contains("<a href=\"models/\">models/</a>"));
        assert!(body.contains("<a href=\"notes%20%26%20ideas.txt\">notes &amp; ideas.txt</a>"));
        assert_dev_headers(res.headers());
    }

    #[tokio::test]
    async fn traversal_outside_root_is_refused() {
        let tmp = site();
        let filter = routes(tmp.path().join("app"));
        let res = warp::test::request()
            .path("/../notes%20&%20ideas.txt")
            .reply(&filter)
            .await;
        assert_eq!(res.status(), 404);
        assert_dev_headers(res.headers());
    }

    #[test]
    fn resolve_request_path_decodes_and_rejects_parent_segments() {
        let root = Path::new("/srv");
        assert_eq!(
            resolve_request_path(root, "/models/color%20model/"),
            Some(PathBuf::from("/srv/models/color model"))
        );
        assert_eq!(resolve_request_path(root, "/a/%2E%2E/b"), None);
        assert_eq!(resolve_request_path(root, "/a/../b"), None);
    }
}
