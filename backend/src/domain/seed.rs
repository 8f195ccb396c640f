//! Sample catalogue used by the seeding endpoints.

use super::{NewCourse, NewUniversity};

const SAMPLE_COURSES: [(&str, &str, u8); 10] = [
    ("Computer Science", "Study of computation, programming, and algorithms.", 60),
    ("Networking", "Study of computer networks and communication systems.", 65),
    ("Mathematical Science", "Study of advanced mathematics and applications.", 70),
    ("Education Science", "Study of teaching methods and educational systems.", 55),
    ("Actuarial Science", "Study of risk analysis and financial mathematics.", 75),
    ("Introduction to Programming", "Learn the basics of programming with Python.", 70),
    (
        "Data Structures and Algorithms",
        "Master the key data structures and algorithms for efficient coding.",
        80,
    ),
    ("Artificial Intelligence", "Explore AI concepts and build intelligent systems.", 90),
    (
        "Web Development",
        "Build modern web applications using HTML, CSS, and JavaScript.",
        75,
    ),
    ("Database Management", "Understand relational databases and SQL.", 65),
];

const SAMPLE_UNIVERSITIES: [(&str, &str); 5] = [
    ("Nairobi University", "Nairobi, NU"),
    ("Tom Mboya University", "Homabay, TMU"),
    ("Kibabii University", "Bungoma, KB"),
    ("University of Eldoret", "Eldoret, UE"),
    ("Kenyatta University", "Nairobi, KU"),
];

/// Course inputs for the sample catalogue.
pub fn sample_courses() -> Vec<NewCourse> {
    SAMPLE_COURSES
        .iter()
        .map(|(name, description, cutoff)| NewCourse {
            name: Some((*name).to_owned()),
            description: Some((*description).to_owned()),
            cutoff: Some(f64::from(*cutoff)),
        })
        .collect()
}

/// University inputs for the sample catalogue.
pub fn sample_universities() -> Vec<NewUniversity> {
    SAMPLE_UNIVERSITIES
        .iter()
        .map(|(name, location)| NewUniversity {
            name: Some((*name).to_owned()),
            location: Some((*location).to_owned()),
            established_year: None,
            course_ids: Vec::new(),
        })
        .collect()
}
