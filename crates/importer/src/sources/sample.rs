use crate::Result;
use crate::canonical::models::{
    FORMAT_VERSION, OpportunityBatch, OpportunityRecord, SourceMetadata, SourceType,
};
use crate::traits::OpportunitySource;
use chrono::{Days, NaiveDate, Utc};
use storage::models::{Domain, OpportunityStatus};

struct Sample {
    title: &'static str,
    university: &'static str,
    domain: Domain,
    description: &'static str,
    days_until_deadline: u64,
    status: OpportunityStatus,
    stipend: &'static str,
    url: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Harvard Research Experience for Undergraduates (REU)",
        university: "Harvard University",
        domain: Domain::Research,
        description: "Paid summer research internship at Harvard labs in STEM fields.",
        days_until_deadline: 30,
        status: OpportunityStatus::Open,
        stipend: "$5,000",
        url: "https://college.harvard.edu/research",
    },
    Sample {
        title: "Yale Young Global Scholars Fellowship",
        university: "Yale University",
        domain: Domain::Fellowship,
        description: "Intensive academic enrichment program for exceptional students.",
        days_until_deadline: 45,
        status: OpportunityStatus::Open,
        stipend: "Full scholarship",
        url: "https://globalscholars.yale.edu",
    },
    Sample {
        title: "Princeton Internship in Civic Service",
        university: "Princeton University",
        domain: Domain::Internship,
        description: "Summer internship opportunities in public service and government.",
        days_until_deadline: 20,
        status: OpportunityStatus::Open,
        stipend: "$4,500",
        url: "https://pace.princeton.edu/students/apply-for-funding/pics",
    },
    Sample {
        title: "Columbia University Research Scholars Program",
        university: "Columbia University",
        domain: Domain::Scholarship,
        description: "Merit-based scholarship for undergraduates pursuing research.",
        days_until_deadline: 60,
        status: OpportunityStatus::Open,
        stipend: "$10,000",
        url: "https://urf.columbia.edu",
    },
    Sample {
        title: "MIT Lincoln Laboratory Research Internship",
        university: "MIT",
        domain: Domain::Research,
        description: "Technical research internship in AI, robotics and security.",
        days_until_deadline: 15,
        status: OpportunityStatus::Open,
        stipend: "$6,000",
        url: "https://www.ll.mit.edu/careers/student-opportunities",
    },
    Sample {
        title: "Penn Medicine Summer Research Program",
        university: "University of Pennsylvania",
        domain: Domain::Research,
        description: "Clinical and translational research at Penn Medicine.",
        days_until_deadline: 25,
        status: OpportunityStatus::Open,
        stipend: "$3,800",
        url: "https://www.med.upenn.edu/pennur/",
    },
    Sample {
        title: "Dartmouth Guarini School PhD Fellowship",
        university: "Dartmouth College",
        domain: Domain::Fellowship,
        description: "Fully funded PhD fellowship across all disciplines.",
        days_until_deadline: 90,
        status: OpportunityStatus::Upcoming,
        stipend: "Full funding + stipend",
        url: "https://graduate.dartmouth.edu/fellowship",
    },
    Sample {
        title: "Brown University UTRA Research Award",
        university: "Brown University",
        domain: Domain::Grant,
        description: "Undergraduate Teaching and Research Award for independent research.",
        days_until_deadline: 35,
        status: OpportunityStatus::Open,
        stipend: "$2,500",
        url: "https://college.brown.edu/academics/research/utra",
    },
];

/// Built-in demo catalog with deadlines relative to `today`.
pub struct SampleCatalog {
    today: NaiveDate,
}

impl SampleCatalog {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn batch(&self) -> OpportunityBatch {
        let opportunities = SAMPLES
            .iter()
            .map(|sample| OpportunityRecord {
                title: sample.title.to_string(),
                description: sample.description.to_string(),
                university: sample.university.to_string(),
                url: sample.url.to_string(),
                deadline: self.today.checked_add_days(Days::new(sample.days_until_deadline)),
                status: Some(sample.status),
                tags: vec![],
                stipend: Some(sample.stipend.to_string()),
                domain: Some(sample.domain),
            })
            .collect();

        OpportunityBatch {
            format_version: FORMAT_VERSION.to_string(),
            source: SourceMetadata {
                r#type: SourceType::Seed,
                url: None,
                extracted_at: Utc::now(),
                extractor: "sample-catalog".to_string(),
                original_filename: None,
            },
            opportunities,
        }
    }
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

#[async_trait::async_trait]
impl OpportunitySource for SampleCatalog {
    async fn load(&self) -> Result<OpportunityBatch> {
        Ok(self.batch())
    }

    fn name(&self) -> &'static str {
        "sample catalog"
    }
}
