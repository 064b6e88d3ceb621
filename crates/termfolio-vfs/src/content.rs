//! The seeded portfolio tree: home documents and the root-level decoys.

use std::cell::Cell;

use termfolio_types::error::Result;

use crate::tree::{FileContent, NodeId, Vfs, VfsBuilder};

/// Root-level directories that exist only to be refused.
pub const DECOY_DIRS: [&str; 5] = ["admin", "bin", "etc", "usr", "root"];

pub const ABOUT_FILE: &str = "about.md";
pub const PROJECTS_FILE: &str = "projects.md";
pub const RESUME_FILE: &str = "resume.md";
/// Hidden file whose text changes on every read.
pub const HINTS_FILE: &str = ".hints";

const ABOUT: &str = "\
## Digital Identity
- Name: Ayush Das
- Headline: Cybersecurity Enthusiast
- Location: Odisha, India
- Short Bio: I protect systems and data from cyber threats.
- Long Bio: I'm Ayush Das, a passionate Cybersecurity Enthusiast and BCA student focused on mastering both Offensive and Defensive Security techniques. My journey in tech began with a deep curiosity for bug hunting, ethical hacking, and OSINT investigations, which gradually evolved into building real-world cybersecurity projects that blend code, creativity, and problem-solving. I thrive on challenges and am constantly seeking opportunities to learn and grow in the ever-evolving field of cybersecurity.

---
## Education
- Undergraduation (BCA) | YCAT | 2026 | 8.4 SGPA
- Higher Secondary | The Dronacharya School | 2023 | 60%
- High School | Navjyoti Vidyalaya | 2021 | 84%

---
## Certifications & Courses
- Cyber Job Simulation by Deloitte
- ANZ Cyber Security Management
- Tata Cybersecurity Analyst Completion Certificate
- Mastercard Cybersecurity Completion Certificate

---
## Key Skills
- Languages: Java, C, C++, Python, HTML, CSS, JS, React, PHP
- Platforms: Linux, AWS
- Tools: Git/GitHub, API Development
";

const PROJECTS: &str = "\
Here are the highlights of some of my projects. You can find more on my GitHub.

Packet Sniffer based on Java
Developed a network packet sniffer in Java to capture, analyze, and display real-time network traffic, aiding in network monitoring and security analysis.

Online Odisha eCommerce website
Designed and developed an e-commerce platform focused on selling traditional and locally-made clothing in Odisha, supporting regional artisans and promoting traditional fashion through a user-friendly online store.

HTTP Server for Wireless File Transfer
Built a lightweight HTTP server to enable remote file transfer over a network without cables, allowing seamless sharing between devices using only a web browser.

Image Encryption & Decryption Tool
Created a secure tool to encrypt and decrypt images using custom algorithms, ensuring data privacy and protection during storage and transfer.

Global Health Expenditure Analysis using Power BI
Analyzed global health spending trends using data visualization and statistical methods to highlight disparities and support policy insights.

---
You can view more projects on my GitHub profile: https://github.com/aayush-xid-su
";

const RESUME: &str = "\
# Ayush Das
Cybersecurity Enthusiast | aayushxidsu.11am@gmail.com | linkedin.com/in/ayushdas-11am

## SUMMARY
Passionate Cybersecurity Enthusiast and BCA student skilled in Offensive and Defensive Security. Experienced in bug hunting, ethical hacking, and OSINT. Proven ability to build real-world cybersecurity projects.

## SKILLS
- Languages: Java, C, C++, Python, HTML, CSS, JavaScript, React, PHP
- Platforms: Linux, AWS
- Tools: Git, GitHub, API Development, Network Analysis Tools

## PROJECTS

### Packet Sniffer (Java)
Developed a network packet sniffer to capture and analyze real-time network traffic for security monitoring.

### Online Odisha eCommerce Website
Designed an e-commerce platform for traditional Odisha clothing.

### C4Crypt & CardCrypt
Created web-based encryption tools using custom chess and card-based cipher algorithms.

### HTTP Server for Wireless File Transfer
Built a lightweight HTTP server for seamless remote file sharing.

## EDUCATION
- Bachelor of Computer Applications (BCA) - YCAT (Expected 2026)
- Higher Secondary - The Dronacharya School (2023)
- High School - Navjyoti Vidyalaya (2021)

## CERTIFICATIONS & COURSES
- Cyber Job Simulation by Deloitte
- ANZ Cyber Security Management
- Tata Cybersecurity Analyst
- Mastercard Cybersecurity
";

const HINTS: [&str; 4] = [
    "Try 'cat about.md' for the short version of who I am.",
    "'ttt 5' opens a game of tic-tac-toe in the center square.",
    "'set theme cosmic' changes the colors; 'theme' lists the rest.",
    "'man cd' explains why some folders stay locked.",
];

/// Build the portfolio tree with the home directory at `/home/<home_user>`.
pub fn portfolio_tree(home_user: &str) -> Result<Vfs> {
    let mut builder = VfsBuilder::new(&format!("/home/{home_user}"))?;
    let home = builder.home();

    builder.file(home, ABOUT_FILE, ABOUT)?;
    builder.file(home, PROJECTS_FILE, PROJECTS)?;
    builder.file(home, RESUME_FILE, RESUME)?;

    let next = Cell::new(0usize);
    builder.file(
        home,
        HINTS_FILE,
        FileContent::computed(move || {
            let i = next.get();
            next.set((i + 1) % HINTS.len());
            format!("Hint {}/{}: {}", i + 1, HINTS.len(), HINTS[i])
        }),
    )?;

    for name in DECOY_DIRS {
        builder.dir(NodeId::ROOT, name)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_is_under_slash_home() {
        let vfs = portfolio_tree("aayush").unwrap();
        assert_eq!(vfs.absolute_path(vfs.home()), "/home/aayush");
        assert_eq!(vfs.lookup("/home/aayush"), Some(vfs.home()));
    }

    #[test]
    fn documents_exist_in_home() {
        let vfs = portfolio_tree("aayush").unwrap();
        for name in [ABOUT_FILE, PROJECTS_FILE, RESUME_FILE, HINTS_FILE] {
            let id = vfs.find_node(name, vfs.home()).unwrap();
            assert!(vfs.node(id).is_file(), "{name}");
        }
        let about = vfs.read(vfs.lookup("~/about.md").unwrap()).unwrap();
        assert!(about.contains("Ayush Das"));
    }

    #[test]
    fn decoys_hang_off_root() {
        let vfs = portfolio_tree("aayush").unwrap();
        for name in DECOY_DIRS {
            let id = vfs.lookup(name).unwrap();
            assert!(vfs.node(id).is_dir());
            assert_eq!(vfs.node(id).parent(), Some(vfs.root()));
        }
    }

    #[test]
    fn root_listing_is_sorted() {
        let vfs = portfolio_tree("aayush").unwrap();
        let names: Vec<&str> = vfs.node(vfs.root()).children().map(|(n, _)| n).collect();
        assert_eq!(names, ["admin", "bin", "etc", "home", "root", "usr"]);
    }

    #[test]
    fn hints_rotate_per_read() {
        let vfs = portfolio_tree("aayush").unwrap();
        let id = vfs.lookup("~/.hints").unwrap();
        let first = vfs.read(id).unwrap();
        let second = vfs.read(id).unwrap();
        assert!(first.starts_with("Hint 1/4"));
        assert!(second.starts_with("Hint 2/4"));
    }

    #[test]
    fn custom_home_user() {
        let vfs = portfolio_tree("guest").unwrap();
        assert_eq!(vfs.absolute_path(vfs.home()), "/home/guest");
        assert_eq!(vfs.get_path(vfs.home()), "~");
    }

    #[test]
    fn resume_has_no_phone_number() {
        let vfs = portfolio_tree("aayush").unwrap();
        let resume = vfs.read(vfs.lookup("~/resume.md").unwrap()).unwrap();
        assert!(!resume.contains("+91"));
    }

    #[test]
    fn dotdot_home_user_is_rejected() {
        assert!(portfolio_tree("..").is_err());
    }
}
