#![no_main]

use libfuzzer_sys::fuzz_target;
use wharf_github_comment::RepoRef;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    if let Ok(repo) = RepoRef::parse(&raw) {
        assert!(!repo.owner.is_empty());
        assert!(!repo.name.is_empty());
        assert!(!repo.owner.contains('/'));
        assert!(!repo.name.contains('/'));
    }
});
