use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use glance_core::{ObjectId, RecordKind};
use glance_git::{listing, raw, Capabilities, GitError, GitSource, ListingOptions};
use glance_tree::{
    Blob, MemoryObjectCache, ObjectCache, ObjectResolver, RepoContext, Tree, TreeError, TreeItem,
};

fn oid(byte: u8) -> ObjectId {
    ObjectId::from_bytes([byte; 20])
}

fn raw_entry(mode: &str, name: &str, id: ObjectId) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(mode.as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(name.as_bytes());
    buf.push(0);
    buf.extend_from_slice(id.as_bytes());
    buf
}

fn listing_line(mode: &str, kind: &str, id: ObjectId, name: &str) -> String {
    format!("{} {} {}\t{}\n", mode, kind, id, name)
}

/// Serves a fixed set of tree payloads and listings, counting calls.
struct FakeRepo {
    caps: Capabilities,
    objects: HashMap<ObjectId, Vec<u8>>,
    shallow: HashMap<ObjectId, String>,
    recursive: HashMap<ObjectId, String>,
    object_reads: AtomicUsize,
    listing_reads: AtomicUsize,
}

impl FakeRepo {
    fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            objects: HashMap::new(),
            shallow: HashMap::new(),
            recursive: HashMap::new(),
            object_reads: AtomicUsize::new(0),
            listing_reads: AtomicUsize::new(0),
        }
    }
}

impl GitSource for FakeRepo {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn read_object(&self, id: &ObjectId) -> Result<Vec<u8>, GitError> {
        self.object_reads.fetch_add(1, Ordering::SeqCst);
        self.objects
            .get(id)
            .cloned()
            .ok_or(GitError::ObjectNotFound(*id))
    }

    fn ls_tree(&self, id: &ObjectId, opts: ListingOptions) -> Result<String, GitError> {
        self.listing_reads.fetch_add(1, Ordering::SeqCst);
        let table = if opts.recursive {
            &self.recursive
        } else {
            &self.shallow
        };
        table.get(id).cloned().ok_or(GitError::ObjectNotFound(*id))
    }
}

/// Memoizing resolver: one canonical instance per hash, like a project
/// object handing out cached trees and blobs.
struct Resolver {
    ctx: Arc<RepoContext>,
    trees: Mutex<HashMap<ObjectId, Arc<Tree>>>,
    blobs: Mutex<HashMap<ObjectId, Arc<Blob>>>,
}

impl Resolver {
    fn new(ctx: Arc<RepoContext>) -> Self {
        Self {
            ctx,
            trees: Mutex::new(HashMap::new()),
            blobs: Mutex::new(HashMap::new()),
        }
    }
}

impl ObjectResolver for Resolver {
    fn tree(&self, id: &ObjectId) -> Result<Arc<Tree>, TreeError> {
        let mut trees = self.trees.lock().unwrap();
        let tree = trees
            .entry(*id)
            .or_insert_with(|| Arc::new(Tree::new(Arc::clone(&self.ctx), *id)));
        Ok(Arc::clone(tree))
    }

    fn blob(&self, id: &ObjectId) -> Result<Arc<Blob>, TreeError> {
        let mut blobs = self.blobs.lock().unwrap();
        let blob = blobs.entry(*id).or_insert_with(|| Arc::new(Blob::new(*id)));
        Ok(Arc::clone(blob))
    }
}

fn build_context(repo: FakeRepo) -> (Arc<RepoContext>, Arc<FakeRepo>, Arc<MemoryObjectCache>) {
    let repo = Arc::new(repo);
    let cache = Arc::new(MemoryObjectCache::new());
    let ctx = Arc::new(RepoContext::new(
        "demo.git",
        Arc::clone(&repo) as Arc<dyn GitSource + Send + Sync>,
        Arc::clone(&cache) as Arc<dyn ObjectCache + Send + Sync>,
    ));
    (ctx, repo, cache)
}

// === Decoder equivalence ===

#[test]
fn raw_and_listing_decoders_agree() {
    let blob_id = oid(0xaa);
    let sub_id = oid(0xbb);
    let module_id = oid(0xcc);

    let mut payload = raw_entry("40000", "sub", sub_id);
    payload.extend(raw_entry("100644", "a.txt", blob_id));
    payload.extend(raw_entry("160000", "vendored", module_id));

    let text = format!(
        "{}{}{}",
        listing_line("040000", "tree", sub_id, "sub"),
        listing_line("100644", "blob", blob_id, "a.txt"),
        listing_line("160000", "commit", module_id, "vendored"),
    );

    let from_raw = raw::decode_tree_object(&payload, "base").unwrap();
    let from_listing = listing::decode_listing(&text, "base");

    assert_eq!(from_raw, from_listing);
    assert_eq!(from_raw.len(), 2);
    assert_eq!(from_raw[0].path, "base/sub");
    assert_eq!(from_raw[1].path, "base/a.txt");
}

// === Worked examples ===

#[test]
fn raw_blob_entry_example() {
    let payload = raw_entry("100644", "a.txt", oid(0xaa));
    let records = raw::decode_tree_object(&payload, "").unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.path, "a.txt");
    assert_eq!(record.mode.to_string(), "100644");
    assert_eq!(record.kind, RecordKind::Blob);
    assert_eq!(record.id.to_hex(), "aa".repeat(20));
    assert_eq!(record.size, None);
}

#[test]
fn listing_tree_entry_example() {
    let text = listing_line("040000", "tree", oid(0xbb), "sub");
    let records = listing::decode_listing(&text, "");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, RecordKind::Tree);
    assert_eq!(records[0].path, "sub");
    assert_eq!(records[0].mode.to_string(), "040000");
}

// === Orchestration ===

#[test]
fn contents_materializes_in_record_order() {
    let root = oid(1);
    let mut repo = FakeRepo::new(Capabilities {
        raw_objects: true,
        listing_sizes: false,
    });
    let mut payload = raw_entry("100644", "z.txt", oid(0xaa));
    payload.extend(raw_entry("40000", "lib", oid(0xbb)));
    repo.objects.insert(root, payload);

    let (ctx, _, _) = build_context(repo);
    let resolver = Resolver::new(Arc::clone(&ctx));
    let tree = Tree::new(Arc::clone(&ctx), root);
    tree.set_commit(oid(0xfe));

    let items = tree.contents(&resolver).unwrap();
    assert_eq!(items.len(), 2);
    assert!(!items[0].is_tree());
    assert!(items[1].is_tree());
    assert_eq!(items[0].path(), "z.txt");
    assert_eq!(items[1].path(), "lib");
    assert_eq!(items[0].mode().unwrap().to_string(), "100644");

    // Owning commit propagates to every materialized entry.
    match &items[0] {
        TreeItem::Blob(blob) => assert_eq!(blob.commit(), Some(oid(0xfe))),
        TreeItem::Tree(_) => panic!("expected blob"),
    }
    match &items[1] {
        TreeItem::Tree(sub) => assert_eq!(sub.commit(), Some(oid(0xfe))),
        TreeItem::Blob(_) => panic!("expected tree"),
    }
}

#[test]
fn duplicate_hashes_materialize_independently() {
    let root = oid(1);
    let shared = oid(0xaa);
    let mut repo = FakeRepo::new(Capabilities {
        raw_objects: true,
        listing_sizes: false,
    });
    let mut payload = raw_entry("100644", "copy_one.txt", shared);
    payload.extend(raw_entry("100644", "copy_two.txt", shared));
    repo.objects.insert(root, payload);

    let (ctx, _, _) = build_context(repo);
    let resolver = Resolver::new(Arc::clone(&ctx));
    let tree = Tree::new(ctx, root);

    let items = tree.contents(&resolver).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id(), items[1].id());
    assert_eq!(items[0].path(), "copy_one.txt");
    assert_eq!(items[1].path(), "copy_two.txt");

    // Renaming one copy must not move the other.
    if let TreeItem::Blob(blob) = &items[1] {
        blob.set_path("renamed.txt");
    }
    assert_eq!(items[0].path(), "copy_one.txt");

    // The first occurrence is the canonical resolver instance.
    let canonical = resolver.blob(&shared).unwrap();
    assert_eq!(canonical.path(), "copy_one.txt");
}

#[test]
fn decode_happens_once_per_hash_across_nodes() {
    let root = oid(1);
    let mut repo = FakeRepo::new(Capabilities {
        raw_objects: true,
        listing_sizes: false,
    });
    repo.objects
        .insert(root, raw_entry("100644", "a.txt", oid(0xaa)));

    let (ctx, repo, cache) = build_context(repo);

    let first = Tree::new(Arc::clone(&ctx), root);
    first.records().unwrap();
    first.records().unwrap();
    assert_eq!(repo.object_reads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);

    // A different node for the same hash decodes from the cache.
    let second = Tree::new(ctx, root);
    assert_eq!(second.records().unwrap().len(), 1);
    assert_eq!(repo.object_reads.load(Ordering::SeqCst), 1);
}

#[test]
fn listing_sizes_flow_through_when_supported() {
    let root = oid(1);
    let mut repo = FakeRepo::new(Capabilities {
        raw_objects: false,
        listing_sizes: true,
    });
    repo.shallow.insert(
        root,
        format!(
            "100644 blob {}    2048\tbig.bin\n040000 tree {}       -\tsrc\n",
            oid(0xaa),
            oid(0xbb)
        ),
    );

    let (ctx, _, _) = build_context(repo);
    let tree = Tree::new(ctx, root);
    let records = tree.records().unwrap();

    assert_eq!(records[0].size, Some(2048));
    assert_eq!(records[1].size, None);
}

#[test]
fn path_index_spans_subtree_and_invalidates_on_move() {
    let root = oid(1);
    let mut repo = FakeRepo::new(Capabilities {
        raw_objects: false,
        listing_sizes: false,
    });
    repo.recursive.insert(
        root,
        format!(
            "{}{}{}",
            listing_line("040000", "tree", oid(0xbb), "src"),
            listing_line("100644", "blob", oid(0xaa), "src/main.rs"),
            listing_line("100644", "blob", oid(0xcc), "README"),
        ),
    );

    let (ctx, repo, _) = build_context(repo);
    let tree = Tree::new(ctx, root);

    assert_eq!(tree.path_to_hash("src/main.rs").unwrap(), Some(oid(0xaa)));
    assert_eq!(tree.path_to_hash("src").unwrap(), Some(oid(0xbb)));
    assert_eq!(tree.path_to_hash("").unwrap(), None);
    assert_eq!(tree.path_to_hash("missing").unwrap(), None);
    assert_eq!(repo.listing_reads.load(Ordering::SeqCst), 1);

    tree.set_path("vendor");
    assert_eq!(
        tree.path_to_hash("vendor/src/main.rs").unwrap(),
        Some(oid(0xaa))
    );
    assert_eq!(tree.path_to_hash("src/main.rs").unwrap(), None);
    assert_eq!(repo.listing_reads.load(Ordering::SeqCst), 2);
}

#[test]
fn missing_object_fails_the_accessor() {
    let repo = FakeRepo::new(Capabilities {
        raw_objects: true,
        listing_sizes: false,
    });
    let (ctx, _, _) = build_context(repo);
    let tree = Tree::new(ctx, oid(9));
    assert!(matches!(
        tree.records(),
        Err(TreeError::Git(GitError::ObjectNotFound(_)))
    ));
}
