//! Many threads sharing one cache.

use std::sync::Arc;
use std::thread;

use template_digest::digest::{DigestCache, DigestOptions, Digestor};
use template_digest::source::MemorySource;

const WIDGETS: [&str; 8] = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];

fn library() -> MemorySource {
    let mut source = MemorySource::new().with_template("shared/_footer", "html", "footer");
    for (i, widget) in WIDGETS.iter().enumerate() {
        source = source
            .with_template(
                format!("pages/page{i}"),
                "html",
                format!("<%= render 'shared/footer' %><%= render 'widgets/{widget}' %>"),
            )
            .with_template(format!("widgets/_{widget}"), "html", format!("widget {widget}"));
    }
    source
}

#[test]
fn test_threads_agree_and_each_template_is_read_once() {
    let source = Arc::new(library());
    let digestor = Digestor::new().with_cache(Arc::new(DigestCache::new()));

    let handles: Vec<_> = (0..16)
        .map(|t| {
            let source = Arc::clone(&source);
            let digestor = digestor.clone();
            thread::spawn(move || {
                (0..8)
                    .map(|i| {
                        let page = (i + t) % 8;
                        let digest = digestor
                            .digest(
                                &format!("pages/page{page}"),
                                "html",
                                &*source,
                                DigestOptions::default(),
                            )
                            .unwrap();
                        (page, digest)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = std::collections::HashMap::new();
    for handle in handles {
        for (page, digest) in handle.join().unwrap() {
            let previous = seen.entry(page).or_insert_with(|| digest.clone());
            assert_eq!(*previous, digest, "page{page} digested differently across threads");
        }
    }

    // 8 pages, 8 widgets, 1 footer
    assert_eq!(source.lookups(), 17);
    assert_eq!(digestor.cache().len(), 17);
}

#[test]
fn test_separate_digestors_sharing_a_cache_share_entries() {
    let source = library();
    let cache = Arc::new(DigestCache::new());
    let first = Digestor::new().with_cache(Arc::clone(&cache));
    let second = Digestor::new().with_cache(Arc::clone(&cache));

    let a = first.digest("pages/page0", "html", &source, DigestOptions::default()).unwrap();
    let lookups = source.lookups();
    let b = second.digest("pages/page0", "html", &source, DigestOptions::default()).unwrap();

    assert_eq!(a, b);
    assert_eq!(source.lookups(), lookups);
}
