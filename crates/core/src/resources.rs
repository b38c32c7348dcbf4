//! Curated learning resources, keyed by course slug.
//!
//! The table is static reference data compiled into the binary. A slug with
//! no entry simply has no curated resources.

use serde::Serialize;

/// A curated external link shown on a course detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

const fn resource(title: &'static str, url: &'static str, description: &'static str) -> Resource {
    Resource {
        title,
        url,
        description,
    }
}

/// Slugs that have an entry in the resource table, in table order.
pub const CURATED_SLUGS: [&str; 9] = [
    "python",
    "c",
    "java",
    "html",
    "css",
    "javascript",
    "dsa",
    "cpp",
    "react",
];

const PYTHON: &[Resource] = &[
    resource(
        "Python.org Official Tutorial",
        "https://docs.python.org/3/tutorial/",
        "The official Python tutorial from python.org",
    ),
    resource(
        "Real Python",
        "https://realpython.com/",
        "Comprehensive Python tutorials and articles",
    ),
    resource(
        "Python for Everybody (Coursera)",
        "https://www.coursera.org/specializations/python",
        "Free course by Dr. Charles Severance",
    ),
];

const C: &[Resource] = &[
    resource(
        "Learn-C.org",
        "https://www.learn-c.org/",
        "Interactive C programming tutorial",
    ),
    resource(
        "C Programming - GeeksforGeeks",
        "https://www.geeksforgeeks.org/c-programming-language/",
        "Comprehensive C tutorials and examples",
    ),
    resource(
        "CS50 - Harvard",
        "https://cs50.harvard.edu/x/",
        "Harvard's introduction to computer science",
    ),
];

const JAVA: &[Resource] = &[
    resource(
        "Oracle Java Tutorials",
        "https://docs.oracle.com/javase/tutorial/",
        "Official Java documentation and tutorials",
    ),
    resource(
        "Java Programming - MOOC.fi",
        "https://java-programming.mooc.fi/",
        "Free Java course from University of Helsinki",
    ),
    resource(
        "Java - W3Schools",
        "https://www.w3schools.com/java/",
        "Interactive Java tutorial with examples",
    ),
];

const HTML: &[Resource] = &[
    resource(
        "MDN Web Docs - HTML",
        "https://developer.mozilla.org/en-US/docs/Web/HTML",
        "Comprehensive HTML documentation",
    ),
    resource(
        "W3Schools HTML Tutorial",
        "https://www.w3schools.com/html/",
        "Beginner-friendly HTML tutorial",
    ),
    resource(
        "FreeCodeCamp",
        "https://www.freecodecamp.org/",
        "Free interactive HTML & web dev course",
    ),
];

const CSS: &[Resource] = &[
    resource(
        "MDN Web Docs - CSS",
        "https://developer.mozilla.org/en-US/docs/Web/CSS",
        "Complete CSS reference and tutorials",
    ),
    resource(
        "CSS-Tricks",
        "https://css-tricks.com/",
        "Tips, tricks, and techniques on CSS",
    ),
    resource(
        "Flexbox Froggy",
        "https://flexboxfroggy.com/",
        "Learn CSS Flexbox through a game",
    ),
];

const JAVASCRIPT: &[Resource] = &[
    resource(
        "MDN JavaScript Guide",
        "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide",
        "Comprehensive JavaScript documentation",
    ),
    resource(
        "JavaScript.info",
        "https://javascript.info/",
        "Modern JavaScript tutorial",
    ),
    resource(
        "Eloquent JavaScript",
        "https://eloquentjavascript.net/",
        "Free online book about JavaScript",
    ),
];

const DSA: &[Resource] = &[
    resource(
        "GeeksforGeeks DSA",
        "https://www.geeksforgeeks.org/data-structures/",
        "Complete DSA tutorial and practice",
    ),
    resource(
        "LeetCode",
        "https://leetcode.com/",
        "Practice coding problems and algorithms",
    ),
    resource(
        "Algorithms - Princeton",
        "https://www.coursera.org/learn/algorithms-part1",
        "Free algorithms course on Coursera",
    ),
];

const CPP: &[Resource] = &[
    resource(
        "LearnCpp.com",
        "https://www.learncpp.com/",
        "Free comprehensive C++ tutorial",
    ),
    resource(
        "C++ Reference",
        "https://en.cppreference.com/",
        "Complete C++ language reference",
    ),
    resource(
        "C++ - GeeksforGeeks",
        "https://www.geeksforgeeks.org/c-plus-plus/",
        "C++ tutorials and practice problems",
    ),
];

const REACT: &[Resource] = &[
    resource(
        "React Official Docs",
        "https://react.dev/",
        "Official React documentation and tutorial",
    ),
    resource(
        "React Tutorial - Scrimba",
        "https://scrimba.com/learn/learnreact",
        "Interactive React course",
    ),
    resource(
        "Full Stack Open",
        "https://fullstackopen.com/",
        "Deep dive into modern web development",
    ),
];

/// Return the curated resources for a course slug, in display order.
///
/// Unknown slugs yield an empty slice.
pub fn resources_for(slug: &str) -> &'static [Resource] {
    match slug {
        "python" => PYTHON,
        "c" => C,
        "java" => JAVA,
        "html" => HTML,
        "css" => CSS,
        "javascript" => JAVASCRIPT,
        "dsa" => DSA,
        "cpp" => CPP,
        "react" => REACT,
        _ => &[],
    }
}
