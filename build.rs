use git2::{DescribeOptions, Repository};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let (version, sha) = match Repository::open(".") {
        Ok(repo) => {
            let sha = repo
                .head()
                .ok()
                .and_then(|head| head.peel_to_commit().ok())
                .map(|commit| commit.id().to_string())
                .unwrap_or_default();
            let version = repo
                .describe(DescribeOptions::new().describe_tags())
                .and_then(|rev| rev.format(None))
                .unwrap_or_else(|_| "<dev>".to_string());
            (version, sha)
        }
        Err(_) => ("<dev>".to_string(), String::new()),
    };
    println!("cargo:rustc-env=GITINJECT_BUILD_VERSION={version}");
    println!("cargo:rustc-env=GITINJECT_BUILD_SHA={sha}");
}
