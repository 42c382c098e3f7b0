use mixer::{Error, FileSystemLoader, MemoryLoader, Result, TemplateCache, TemplateLoader};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Counts loader calls and serves a fixed template.
struct CountingLoader {
    calls: AtomicUsize,
}

impl TemplateLoader for CountingLoader {
    fn load(&self, key: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("<p>{key}: ---v---</p>"))
    }
}

fn counting_cache() -> TemplateCache<CountingLoader> {
    TemplateCache::new(CountingLoader {
        calls: AtomicUsize::new(0),
    })
}

#[test]
fn test_file_system_loader() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("page.html"), "<h1>---title---</h1>\n").unwrap();

    let loader = FileSystemLoader::new(temp_dir.path());
    assert_eq!(loader.load("page.html").unwrap(), "<h1>---title---</h1>\n");
}

#[test]
fn test_file_system_loader_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let loader = FileSystemLoader::new(temp_dir.path());

    match loader.load("missing.html") {
        Err(Error::TemplateNotFoundError { key }) => assert!(key.ends_with("missing.html")),
        other => panic!("Expected TemplateNotFoundError, got {other:?}"),
    }
}

#[test]
fn test_load_once_calls_loader_once() {
    let cache = counting_cache();

    let first = cache.load_once("index").unwrap();
    let second = cache.load_once("index").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.loader().calls.load(Ordering::SeqCst), 1);
    assert!(cache.contains("index"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidate_reloads() {
    let cache = counting_cache();
    cache.load_once("index").unwrap();

    assert!(cache.invalidate("index"));
    assert!(!cache.invalidate("index"));
    cache.load_once("index").unwrap();
    assert_eq!(cache.loader().calls.load(Ordering::SeqCst), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_concurrent_loads_agree() {
    let cache = counting_cache();

    let texts: Vec<Arc<str>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.load_once("page").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(texts.iter().all(|text| &**text == "<p>page: ---v---</p>"));
    assert_eq!(cache.len(), 1);
    let calls = cache.loader().calls.load(Ordering::SeqCst);
    assert!((1..=8).contains(&calls));
}

#[test]
fn test_mixers_do_not_share_text() {
    let cache = TemplateCache::new(MemoryLoader::with_templates([(
        "list",
        "<ul>-r-<li>-n-</li>-r-</ul>",
    )]));

    let mut first = cache.mixer("list").unwrap();
    first.remove_context("-r-").unwrap();
    let mut second = cache.mixer("list").unwrap();
    second.add_in_context("-r-", "-n-", "1").unwrap();

    assert_eq!(first.resolve().unwrap(), "<ul></ul>");
    assert_eq!(second.resolve().unwrap(), "<ul><li>1</li></ul>");
    assert_eq!(&*cache.load_once("list").unwrap(), "<ul>-r-<li>-n-</li>-r-</ul>");
}

#[test]
fn test_load_fragment() {
    let cache = TemplateCache::new(MemoryLoader::with_templates([(
        "page",
        "<html>---mail---Hi ---name---!---mail---</html>",
    )]));

    assert_eq!(cache.load_fragment("page", "---mail---").unwrap(), "Hi ---name---!");
    assert!(matches!(
        cache.load_fragment("page", "---other---"),
        Err(Error::MalformedContextError { .. })
    ));
}

#[test_log::test]
fn test_load_failure_is_hard_error() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TemplateCache::new(FileSystemLoader::new(temp_dir.path()));

    assert!(matches!(cache.mixer("nope.html"), Err(Error::TemplateNotFoundError { .. })));
    assert!(cache.is_empty());
}
