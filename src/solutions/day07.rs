use anyhow::{bail, ensure, Context, Result};
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::DfsPostOrder;
use petgraph::Direction;

const DISK_SIZE: u64 = 70_000_000;
const REQUIRED_FREE: u64 = 30_000_000;
const SMALL_DIRECTORY: u64 = 100_000;

#[derive(Debug, Default)]
struct Directory<'a> {
    files: IndexMap<&'a str, u64>,
    subdirs: IndexMap<&'a str, NodeIndex>,
}

/// Directory tree with edges pointing from parent to child.
struct Filesystem<'a> {
    tree: DiGraph<Directory<'a>, ()>,
    root: NodeIndex,
}

impl<'a> Filesystem<'a> {
    fn replay(transcript: &'a str) -> Result<Self> {
        let mut tree = DiGraph::new();
        let root = tree.add_node(Directory::default());
        let mut cwd = root;
        let mut listing = false;

        for line in transcript.lines() {
            if let Some(command) = line.strip_prefix("$ ") {
                listing = false;
                match command.split_once(' ') {
                    Some(("cd", "/")) => cwd = root,
                    Some(("cd", "..")) => {
                        cwd = tree
                            .neighbors_directed(cwd, Direction::Incoming)
                            .next()
                            .context("cd .. from the root directory")?;
                    }
                    Some(("cd", name)) => {
                        cwd = *tree[cwd]
                            .subdirs
                            .get(name)
                            .with_context(|| format!("cd into unlisted directory {:?}", name))?;
                    }
                    None if command == "ls" => listing = true,
                    _ => bail!("unknown command {:?}", command),
                }
                continue;
            }

            ensure!(listing, "output outside of a listing: {:?}", line);
            let (size, name) = line
                .split_once(' ')
                .with_context(|| format!("malformed listing entry {:?}", line))?;
            if size == "dir" {
                if !tree[cwd].subdirs.contains_key(name) {
                    let child = tree.add_node(Directory::default());
                    tree.add_edge(cwd, child, ());
                    tree[cwd].subdirs.insert(name, child);
                }
            } else {
                let size = size
                    .parse::<u64>()
                    .with_context(|| format!("invalid file size in {:?}", line))?;
                tree[cwd].files.insert(name, size);
            }
        }

        Ok(Self { tree, root })
    }

    /// Total size of every directory, indexed by node.
    fn directory_sizes(&self) -> Vec<u64> {
        let mut sizes = vec![0; self.tree.node_count()];
        let mut dfs = DfsPostOrder::new(&self.tree, self.root);
        while let Some(node) = dfs.next(&self.tree) {
            let dir = &self.tree[node];
            sizes[node.index()] = dir.files.values().sum::<u64>()
                + dir
                    .subdirs
                    .values()
                    .map(|child| sizes[child.index()])
                    .sum::<u64>();
        }
        sizes
    }
}

pub fn day7(input: &str) -> Result<(u64, u64)> {
    let fs = Filesystem::replay(input)?;
    let sizes = fs.directory_sizes();

    let small = sizes
        .iter()
        .filter(|&&size| size <= SMALL_DIRECTORY)
        .sum::<u64>();

    let free = DISK_SIZE.saturating_sub(sizes[fs.root.index()]);
    let to_clear = REQUIRED_FREE.saturating_sub(free);
    let smallest = sizes
        .iter()
        .copied()
        .filter(|&size| size >= to_clear)
        .min()
        .context("no directory frees enough space")?;

    Ok((small, smallest))
}
