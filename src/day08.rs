use anyhow::{ensure, Context, Result};

struct Node {children: Vec<Node>, metadata: Vec<usize>}

impl Node {
    fn parse(nums: &mut impl Iterator<Item = usize>) -> Result<Node> {
        let n_children = nums.next().context("truncated header")?;
        let n_meta = nums.next().context("truncated header")?;
        let children = (0 .. n_children).map(|_| Node::parse(nums)).collect::<Result<_>>()?;
        let metadata = nums.take(n_meta).collect::<Vec<_>>();
        ensure!(metadata.len() == n_meta, "truncated metadata");
        Ok(Node {children, metadata})
    }

    fn metadata_sum(&self) -> usize {
        self.metadata.iter().sum::<usize>() + self.children.iter().map(Node::metadata_sum).sum::<usize>()
    }

    fn value(&self) -> usize {
        if self.children.is_empty() {return self.metadata.iter().sum()}
        self.metadata.iter().filter_map(|&m| m.checked_sub(1).and_then(|i| self.children.get(i)))
                            .map(Node::value).sum()
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let nums = input.split_whitespace().map(str::parse).collect::<Result<Vec<usize>, _>>()?;
    let mut nums = nums.into_iter();
    let root = Node::parse(&mut nums)?;
    ensure!(nums.next().is_none(), "trailing numbers after the root node");
    Ok(if part == 1 {root.metadata_sum()} else {root.value()}.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "2 3 0 3 10 11 12 1 1 0 1 99 2 1 1 2\n";

    #[test]
    fn metadata_sum() {
        assert_eq!(solve(1, TREE).unwrap(), "138");
    }

    #[test]
    fn root_value() {
        assert_eq!(solve(2, TREE).unwrap(), "66");
    }

    #[test]
    fn malformed_trees() {
        assert!(solve(1, "1 1 0").is_err());
        assert!(solve(1, "0 1 5 7").is_err());
    }
}
