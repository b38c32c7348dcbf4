//! The seeded course catalog.
//!
//! Mirrors `migrations/*_seed_courses.sql` so the in-memory store serves the
//! same catalog as a freshly migrated database. Every seeded slug has an
//! entry in the curated resource table.

/// A course definition used for seeding.
#[derive(Debug, Clone, Copy)]
pub struct SeedCourse {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub icon: Option<&'static str>,
    pub color: Option<&'static str>,
}

/// Catalog entries in creation order.
pub const COURSES: &[SeedCourse] = &[
    SeedCourse {
        name: "Python",
        slug: "python",
        description: "Learn Python from the basics to writing real scripts and applications.",
        icon: Some("Code"),
        color: Some("from-blue-500 to-yellow-500"),
    },
    SeedCourse {
        name: "C",
        slug: "c",
        description: "Master the fundamentals of C: memory, pointers and the standard library.",
        icon: Some("Terminal"),
        color: Some("from-slate-500 to-slate-700"),
    },
    SeedCourse {
        name: "Java",
        slug: "java",
        description: "Object-oriented programming with Java, from classes to collections.",
        icon: Some("Server"),
        color: Some("from-red-500 to-orange-500"),
    },
    SeedCourse {
        name: "HTML",
        slug: "html",
        description: "Structure web pages with semantic, accessible HTML.",
        icon: Some("Globe"),
        color: Some("from-orange-500 to-red-500"),
    },
    SeedCourse {
        name: "CSS",
        slug: "css",
        description: "Style the web with selectors, the box model, Flexbox and Grid.",
        icon: Some("Layers"),
        color: Some("from-blue-500 to-cyan-500"),
    },
    SeedCourse {
        name: "JavaScript",
        slug: "javascript",
        description: "The language of the web: syntax, the DOM, and asynchronous programming.",
        icon: Some("Braces"),
        color: Some("from-yellow-400 to-orange-500"),
    },
    SeedCourse {
        name: "Data Structures & Algorithms",
        slug: "dsa",
        description: "Arrays, trees, graphs and the algorithms that work on them.",
        icon: Some("GitBranch"),
        color: Some("from-emerald-500 to-teal-600"),
    },
    SeedCourse {
        name: "C++",
        slug: "cpp",
        description: "Systems programming in C++ with classes, templates and the STL.",
        icon: Some("Cpu"),
        color: Some("from-indigo-500 to-blue-600"),
    },
    SeedCourse {
        name: "React",
        slug: "react",
        description: "Build interactive user interfaces with components and hooks.",
        icon: Some("Smartphone"),
        color: Some("from-cyan-400 to-blue-500"),
    },
];
