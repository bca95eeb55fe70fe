//! The tree a fresh desktop boots with.

use super::engine::Identity;
use super::node::Node;

const README: &str = "Welcome to the desktop.\nType 'help' in the terminal to list commands.";
const BASHRC: &str = "# ~/.bashrc\nexport PS1='\\u@\\h:\\w$ '";

/// Default filesystem: `/home/<user>` with the usual folders, plus
/// `/etc`, `/tmp` and `/bin`.
pub fn default_tree(identity: &Identity, hostname: &str) -> Node {
    let (user, group) = (identity.user.as_str(), identity.group.as_str());

    let home = Node::directory(user, user, group)
        .with_child(Node::directory("Desktop", user, group))
        .with_child(
            Node::directory("Documents", user, group)
                .with_child(Node::file("readme.txt", README, user, group)),
        )
        .with_child(Node::directory("Downloads", user, group))
        .with_child(Node::file(".bashrc", BASHRC, user, group));

    Node::directory("", "root", "root")
        .with_child(Node::directory("home", "root", "root").with_child(home))
        .with_child(
            Node::directory("etc", "root", "root")
                .with_child(Node::file("hostname", hostname, "root", "root")),
        )
        .with_child(Node::directory("tmp", "root", "root"))
        .with_child(Node::directory("bin", "root", "root"))
}
